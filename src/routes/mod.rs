// Route exports
pub mod errors;
pub mod images;
pub mod profiles;
pub mod quiz;

use actix_web::web;
use std::sync::Arc;

use crate::core::Matcher;
use crate::services::{GeminiClient, ProfileStore};

pub use errors::{handle_json_payload_error, handle_query_payload_error, JsonError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
    pub store: Arc<dyn ProfileStore>,
    pub matcher: Matcher,
}

/// Upper bound for JSON bodies, sized for base64 PNG uploads
pub const JSON_PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

/// JSON extractor settings shared by the server and tests
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(handle_json_payload_error)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(quiz::configure)
            .configure(profiles::configure)
            .configure(images::configure),
    );
}
