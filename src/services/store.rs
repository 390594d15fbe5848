use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CandidateProfile, Gender, NewProfile};

/// Errors that can occur when talking to the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Object path of a profile's pudding image inside the bucket
pub fn pudding_image_path(profile_id: &str) -> String {
    format!("puddings/{}.png", profile_id)
}

/// Persistence for quiz profiles and their generated images
///
/// Multi-step sequences (insert then score, upload then update) are not
/// transactional; a failure between steps leaves the earlier step in place.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a profile and return the stored row
    async fn insert_profile(&self, profile: NewProfile) -> Result<CandidateProfile, StoreError>;

    /// All profiles of the given gender, in store order
    async fn profiles_by_gender(&self, gender: Gender) -> Result<Vec<CandidateProfile>, StoreError>;

    /// Upload (or replace) a profile's PNG and return its public URL
    async fn upload_pudding_image(&self, profile_id: &str, png: Vec<u8>) -> Result<String, StoreError>;

    /// Record the image URL on the profile row
    async fn set_pudding_image_url(&self, profile_id: &str, url: &str) -> Result<(), StoreError>;

    async fn health_check(&self) -> bool;
}
