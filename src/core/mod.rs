// Core algorithm exports
pub mod character;
pub mod describe;
pub mod filters;
pub mod matcher;
pub mod phrases;
pub mod quiz;
pub mod scoring;

pub use character::{build_image_prompt, build_reason, decide_identity, pick_pudding};
pub use describe::describe_match;
pub use filters::{is_eligible, target_gender};
pub use matcher::{MatchResult, Matcher, DEFAULT_MATCH_LIMIT};
pub use quiz::{progress_percent, transition, ProfileDraft, QuizEvent, QuizState, TransitionError, QUESTIONS};
pub use scoring::calculate_match_score;
