//! Little Pudding - personality quiz and pudding matchmaking service
//!
//! This library maps quiz answers to a pudding character, ranks candidate
//! profiles against the quiz taker and talks to the image model and the
//! profile store behind the HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{pick_pudding, MatchResult, Matcher};
pub use crate::models::{AnswerSet, CandidateProfile, Identity, MatchPreferences, PuddingResult, ScoredMatch, ScoringWeights};
