use serde::{Deserialize, Serialize};

use crate::models::domain::{
    ConflictStyle, DateFrequency, Gender, LovePriority, PuddingResult, ScoredMatch,
};

/// Name shown for matches whose row carries no pudding name
pub const MYSTERY_PUDDING_NAME: &str = "Mystery Pudding Partner 💞🍮";

/// One ranked match as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealMatch {
    pub id: String,
    pub nickname: String,
    pub pudding_name: String,
    pub gender: Option<Gender>,
    pub love_priority: Option<LovePriority>,
    pub date_frequency: Option<DateFrequency>,
    pub conflict_style: Option<ConflictStyle>,
    pub share_instagram: bool,
    pub instagram_id: Option<String>,
    pub pudding_image_url: Option<String>,
    pub description: String,
    pub score: u32,
}

impl From<ScoredMatch> for IdealMatch {
    fn from(scored: ScoredMatch) -> Self {
        let description = crate::core::describe_match(&scored.candidate);
        let share_instagram = scored.candidate.shares_instagram();
        let candidate = scored.candidate;

        Self {
            id: candidate.id,
            nickname: candidate.nickname,
            pudding_name: candidate
                .pudding_name
                .unwrap_or_else(|| MYSTERY_PUDDING_NAME.to_string()),
            gender: candidate.gender,
            love_priority: candidate.love_priority,
            date_frequency: candidate.date_frequency,
            conflict_style: candidate.conflict_style,
            share_instagram,
            instagram_id: if share_instagram { candidate.instagram_id } else { None },
            pudding_image_url: candidate.pudding_image_url,
            description,
            score: scored.score,
        }
    }
}

/// Response for the quiz result endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultResponse {
    pub pudding: PuddingResult,
    pub ideal_matches: Vec<IdealMatch>,
}

/// Response for the profile submission endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatchResponse {
    pub profile_id: String,
    pub ideal_matches: Vec<IdealMatch>,
}

/// Raw base64 image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub image_base64: String,
}

/// URL of an image (data URL or public storage URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlResponse {
    pub url: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
