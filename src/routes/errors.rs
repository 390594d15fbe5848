use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use crate::models::ErrorResponse;
use crate::services::{GeminiError, StoreError};

/// JSON error response for payload extraction failures
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse::new("invalid_json", format!("Invalid JSON: {}", err), 400)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400)).into()
}

pub fn validation_failed(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}

pub fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

pub fn store_failure(action: &str, err: &StoreError) -> HttpResponse {
    tracing::error!("Failed to {}: {}", action, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        format!("Failed to {}", action),
        err.to_string(),
        500,
    ))
}

/// Map an image generation failure to its HTTP status
pub fn gemini_failure(err: &GeminiError) -> HttpResponse {
    let status = match err {
        GeminiError::Upstream(_) | GeminiError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        GeminiError::MissingApiKey | GeminiError::ClientError(_) | GeminiError::NoImageData => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    match err.upstream_status() {
        Some(upstream) => tracing::error!(
            "Image generation failed ({}, upstream status {}): {}",
            status,
            upstream,
            err
        ),
        None => tracing::error!("Image generation failed ({}): {}", status, err),
    }

    HttpResponse::build(status).json(ErrorResponse::new(
        "Image generation failed",
        err.to_string(),
        status.as_u16(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{FetchError, RetryError};
    use actix_web::body::MessageBody;

    #[test]
    fn test_gemini_status_mapping() {
        let upstream = GeminiError::Upstream(RetryError {
            attempts: 5,
            last: FetchError::NotReplayable,
        });
        assert_eq!(gemini_failure(&upstream).status(), StatusCode::BAD_GATEWAY);

        let overloaded = GeminiError::Upstream(RetryError {
            attempts: 5,
            last: FetchError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "overloaded".to_string(),
            },
        });
        assert_eq!(overloaded.upstream_status(), Some(503));
        assert_eq!(gemini_failure(&overloaded).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            gemini_failure(&GeminiError::NoImageData).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            gemini_failure(&GeminiError::MissingApiKey).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_json_error_body() {
        let err = JsonError(ErrorResponse::new("invalid_json", "Invalid JSON: EOF", 400));
        let response = error::ResponseError::error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_json");
        assert_eq!(json["status_code"], 400);
    }
}
