use actix_web::{web, HttpResponse, Responder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use validator::Validate;

use crate::models::{GenerateImageRequest, GenerateImageResponse, ImageUrlResponse, SaveImageRequest};
use crate::routes::errors::{bad_request, gemini_failure, store_failure, validation_failed};
use crate::routes::AppState;
use crate::services::gemini::mascot_prompt;

/// Configure image routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/generate_image", web::post().to(generate_image))
        .route("/generate-image", web::post().to(generate_mascot_image))
        .route("/save_image", web::post().to(save_image));
}

/// POST /api/generate_image
///
/// Returns `{ "imageBase64": "..." }` for the given prompt.
async fn generate_image(
    state: web::Data<AppState>,
    req: web::Json<GenerateImageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match state.gemini.generate_image(&req.prompt).await {
        Ok(image_base64) => HttpResponse::Ok().json(GenerateImageResponse { image_base64 }),
        Err(e) => gemini_failure(&e),
    }
}

/// POST /api/generate-image
///
/// Wraps the prompt in the mascot template and returns a PNG data URL.
async fn generate_mascot_image(
    state: web::Data<AppState>,
    req: web::Json<GenerateImageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match state.gemini.generate_image(&mascot_prompt(&req.prompt)).await {
        Ok(data) => HttpResponse::Ok().json(ImageUrlResponse {
            url: format!("data:image/png;base64,{}", data),
        }),
        Err(e) => gemini_failure(&e),
    }
}

/// POST /api/save_image
///
/// Uploads the PNG and records its public URL on the profile. A failed row
/// update leaves the uploaded object in place.
async fn save_image(
    state: web::Data<AppState>,
    req: web::Json<SaveImageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    let png = match decode_image(&req.image_base64) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::info!("Undecodable image for profile {}: {}", req.profile_id, e);
            return bad_request("Invalid image data", e.to_string());
        }
    };

    let url = match state.store.upload_pudding_image(&req.profile_id, png).await {
        Ok(url) => url,
        Err(e) => return store_failure("upload image", &e),
    };

    if let Err(e) = state.store.set_pudding_image_url(&req.profile_id, &url).await {
        return store_failure("update profile image", &e);
    }

    tracing::info!("Saved pudding image for profile {}", req.profile_id);
    HttpResponse::Ok().json(ImageUrlResponse { url })
}

/// Decode raw base64 or a `data:...;base64,` URL
fn decode_image(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = match payload.trim().split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload.trim(),
    };
    STANDARD.decode(data)
}
