use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::{ConflictStyle, DateFrequency, Gender, LovePriority, NewProfile};

/// Request to generate a pudding image from a prompt
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(min = 1, message = "Prompt is required."))]
    #[serde(default)]
    pub prompt: String,
}

/// Profile submission at the end of the quiz
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[validate(length(min = 1, message = "Nickname is required."))]
    #[serde(default, deserialize_with = "trimmed")]
    pub nickname: String,
    #[serde(default)]
    pub instagram_id: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub love_priority: Option<LovePriority>,
    #[serde(default)]
    pub date_frequency: Option<DateFrequency>,
    #[serde(default)]
    pub conflict_style: Option<ConflictStyle>,
}

/// Nicknames are validated and stored without surrounding whitespace
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

impl ProfileRequest {
    pub fn into_new_profile(self) -> NewProfile {
        let instagram_id = self
            .instagram_id
            .map(|handle| handle.trim().to_string())
            .filter(|handle| !handle.is_empty());

        NewProfile {
            nickname: self.nickname.trim().to_string(),
            instagram_id,
            gender: self.gender,
            love_priority: self.love_priority,
            date_frequency: self.date_frequency,
            conflict_style: self.conflict_style,
        }
    }
}

/// Request to persist a generated image against a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveImageRequest {
    #[validate(length(min = 1, message = "Missing data"))]
    #[serde(default)]
    pub profile_id: String,
    #[validate(length(min = 1, message = "Missing data"))]
    #[serde(default, alias = "base64")]
    pub image_base64: String,
}
