use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{CandidateProfile, ConflictStyle, DateFrequency, Gender, LovePriority, NewProfile};
use crate::services::store::{pudding_image_path, ProfileStore, StoreError};

/// In-process profile store used when no database is configured
///
/// Starts from a small fixed pool of ideal puddings; inserted profiles are
/// kept for the lifetime of the process.
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<CandidateProfile>>,
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryProfileStore {
    pub fn new(profiles: Vec<CandidateProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            images: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_seed_profiles() -> Self {
        Self::new(seed_profiles())
    }

    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn image(&self, profile_id: &str) -> Option<Vec<u8>> {
        self.images.read().await.get(&pudding_image_path(profile_id)).cloned()
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::with_seed_profiles()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert_profile(&self, profile: NewProfile) -> Result<CandidateProfile, StoreError> {
        let stored = CandidateProfile {
            id: uuid::Uuid::new_v4().to_string(),
            nickname: profile.nickname,
            pudding_name: None,
            gender: Some(profile.gender),
            love_priority: profile.love_priority,
            date_frequency: profile.date_frequency,
            conflict_style: profile.conflict_style,
            instagram_id: profile.instagram_id,
            pudding_image_url: None,
            created_at: Some(chrono::Utc::now()),
        };

        self.profiles.write().await.push(stored.clone());
        tracing::debug!("Stored profile {} in memory", stored.id);

        Ok(stored)
    }

    async fn profiles_by_gender(&self, gender: Gender) -> Result<Vec<CandidateProfile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .filter(|p| p.gender == Some(gender))
            .cloned()
            .collect())
    }

    async fn upload_pudding_image(&self, profile_id: &str, png: Vec<u8>) -> Result<String, StoreError> {
        let path = pudding_image_path(profile_id);
        self.images.write().await.insert(path.clone(), png);
        Ok(format!("memory://puddings/{}", path))
    }

    async fn set_pudding_image_url(&self, profile_id: &str, url: &str) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| StoreError::NotFound(format!("Profile {} not found", profile_id)))?;

        profile.pudding_image_url = Some(url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    nickname: &str,
    pudding_name: &str,
    gender: Gender,
    love: LovePriority,
    date: DateFrequency,
    conflict: ConflictStyle,
    instagram: Option<&str>,
) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        nickname: nickname.to_string(),
        pudding_name: Some(pudding_name.to_string()),
        gender: Some(gender),
        love_priority: Some(love),
        date_frequency: Some(date),
        conflict_style: Some(conflict),
        instagram_id: instagram.map(str::to_string),
        pudding_image_url: None,
        created_at: None,
    }
}

/// Fixed pool of ideal puddings
pub fn seed_profiles() -> Vec<CandidateProfile> {
    vec![
        seed(
            "ideal_1",
            "Strawberry Heart",
            "Romantic Heart Strawberry 💘🍓",
            Gender::Female,
            LovePriority::Thrilled,
            DateFrequency::Everyday,
            ConflictStyle::Immediate,
            Some("https://instagram.com/strawberry_heart"),
        ),
        seed(
            "ideal_2",
            "Matcha Growth",
            "Calm Growth Matcha 📚🍵",
            Gender::Male,
            LovePriority::Growth,
            DateFrequency::Biweekly,
            ConflictStyle::AfterThinking,
            None,
        ),
        seed(
            "ideal_3",
            "Choco Laugh",
            "Funny Choco Buddy 😂🍫",
            Gender::Female,
            LovePriority::HumorCode,
            DateFrequency::Monthly,
            ConflictStyle::Immediate,
            Some("https://instagram.com/choco_laugh"),
        ),
        seed(
            "ideal_4",
            "Custard Prince",
            "Romantic Custard Prince 💘🍮",
            Gender::Male,
            LovePriority::Thrilled,
            DateFrequency::Everyday,
            ConflictStyle::AfterThinking,
            None,
        ),
        seed(
            "ideal_5",
            "Caramel Partner",
            "Diligent Caramel Partner 📚🍯",
            Gender::Female,
            LovePriority::Growth,
            DateFrequency::Biweekly,
            ConflictStyle::Immediate,
            Some("https://instagram.com/caramel_partner"),
        ),
    ]
}
