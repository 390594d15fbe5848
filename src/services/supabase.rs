use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::{CandidateProfile, Gender, NewProfile};
use crate::services::store::{pudding_image_path, ProfileStore, StoreError};

/// Supabase REST and storage client
///
/// Handles all communication with the hosted backend:
/// - Inserting quiz profiles
/// - Selecting candidate profiles by gender
/// - Uploading pudding images and recording their public URL
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    profiles_table: String,
    images_bucket: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        service_key: String,
        profiles_table: String,
        images_bucket: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            profiles_table,
            images_bucket,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.profiles_table)
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.images_bucket, path)
    }

    /// Public URL of an object in the images bucket
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.images_bucket, path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    async fn check(response: Response, action: &str) -> Result<Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);

        Err(StoreError::ApiError(format!("Failed to {}: {}", action, status)))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn insert_profile(&self, profile: NewProfile) -> Result<CandidateProfile, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&profile)
            .send()
            .await?;

        let response = Self::check(response, "insert profile").await?;
        let json: Value = response.json().await?;

        // PostgREST returns the inserted rows as an array
        let row = match json {
            Value::Array(rows) => rows.into_iter().next(),
            row @ Value::Object(_) => Some(row),
            _ => None,
        }
        .ok_or_else(|| StoreError::InvalidResponse("Insert returned no rows".to_string()))?;

        let stored: CandidateProfile = serde_json::from_value(row)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        tracing::debug!("Inserted profile {}", stored.id);
        Ok(stored)
    }

    async fn profiles_by_gender(&self, gender: Gender) -> Result<Vec<CandidateProfile>, StoreError> {
        let url = format!(
            "{}?select=*&gender=eq.{}",
            self.table_url(),
            urlencoding::encode(gender.as_str())
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, "fetch candidates").await?;

        let json: Value = response.json().await?;
        let rows = json
            .as_array()
            .ok_or_else(|| StoreError::InvalidResponse("Expected an array of rows".into()))?;

        let profiles: Vec<CandidateProfile> = rows
            .iter()
            .filter_map(|row| match serde_json::from_value(row.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping unreadable profile row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} {} profiles", profiles.len(), gender);
        Ok(profiles)
    }

    async fn upload_pudding_image(&self, profile_id: &str, png: Vec<u8>) -> Result<String, StoreError> {
        let path = pudding_image_path(profile_id);

        let response = self
            .authorized(self.client.post(self.object_url(&path)))
            .header("Content-Type", "image/png")
            .header("x-upsert", "true")
            .body(png)
            .send()
            .await?;

        Self::check(response, "upload image").await?;

        Ok(self.public_url(&path))
    }

    async fn set_pudding_image_url(&self, profile_id: &str, url: &str) -> Result<(), StoreError> {
        let target = format!(
            "{}?id=eq.{}",
            self.table_url(),
            urlencoding::encode(profile_id)
        );

        let response = self
            .authorized(self.client.patch(&target))
            .header("Prefer", "return=minimal")
            .json(&json!({ "pudding_image_url": url }))
            .send()
            .await?;

        Self::check(response, "update profile image").await?;

        tracing::debug!("Recorded image URL for profile {}", profile_id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}?select=id&limit=1", self.table_url());
        match self.authorized(self.client.get(&url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Supabase health check failed: {}", e);
                false
            }
        }
    }
}
