// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnswerSet, CandidateProfile, ConflictStyle, DateFrequency, EmotionExpression, Energy, Gender,
    Hobby, Identity, LovePriority, MatchPreferences, NewProfile, Plan, PuddingResult, QuestionId,
    QuizError, Rhythm, ScoredMatch, ScoringWeights, Season,
};
pub use requests::{GenerateImageRequest, ProfileRequest, SaveImageRequest};
pub use responses::{
    ErrorResponse, GenerateImageResponse, HealthResponse, IdealMatch, ImageUrlResponse,
    ProfileMatchResponse, QuizResultResponse, MYSTERY_PUDDING_NAME,
};
