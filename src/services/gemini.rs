use crate::services::retry::{fetch_with_backoff, FetchError, RetryError, RetryPolicy};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when generating an image
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Server is missing GEMINI_API_KEY.")]
    MissingApiKey,

    #[error("Failed to create HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error(transparent)]
    Upstream(#[from] RetryError<FetchError>),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No image data returned from Gemini.")]
    NoImageData,
}

impl GeminiError {
    /// HTTP status of the last failed attempt, when the API answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GeminiError::Upstream(retry) => retry.last.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

/// Generative image API client
///
/// Sends one prompt per call to `{endpoint}/models/{model}:generateContent`
/// and returns the base64 payload of the first image part.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: Client,
    retry: RetryPolicy,
}

impl GeminiClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client,
            retry,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Generate a square image for `prompt`, returning its base64 data
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig { aspect_ratio: "1:1" },
            },
        };

        let request = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&body);

        tracing::debug!("Requesting image from model {}", self.model);

        let response = fetch_with_backoff(&self.retry, request).await?;

        let json: Value = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?;

        extract_image_data(&json).ok_or_else(|| {
            tracing::error!("No inlineData in response: {}", json);
            GeminiError::NoImageData
        })
    }
}

/// Pull `candidates[0].content.parts[*].inlineData.data` out of a response
pub fn extract_image_data(response: &Value) -> Option<String> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?
        .iter()
        .find_map(|part| part.get("inlineData")?.get("data")?.as_str())
        .map(str::to_string)
}

/// Wrap a free-form theme in the mascot prompt used by the data-URL endpoint
pub fn mascot_prompt(theme: &str) -> String {
    format!(
        "Generate a cute pudding mascot character.\n\
         Soft pastel tone, round shape, kawaii style.\n\
         Theme: {}.\n\
         Make the design adorable and expressive.",
        theme.trim()
    )
}
