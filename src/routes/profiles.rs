use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::target_gender;
use crate::models::{IdealMatch, MatchPreferences, ProfileMatchResponse, ProfileRequest};
use crate::routes::errors::{store_failure, validation_failed};
use crate::routes::AppState;

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(create_profile));
}

/// Store a profile and return its ideal matches
///
/// POST /api/profiles
///
/// Request body:
/// ```json
/// {
///   "nickname": "string",
///   "instagramId": "string",
///   "gender": "male|female",
///   "lovePriority": "thrilled|growth|humor code",
///   "dateFrequency": "everyday|biweekly|monthly",
///   "conflictStyle": "immediate|afterThinking"
/// }
/// ```
///
/// The insert is not undone if scoring fails afterwards.
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<ProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for profile request: {:?}", errors);
        return validation_failed(&errors);
    }

    let profile = req.into_inner().into_new_profile();
    let preferences = MatchPreferences::from(&profile);

    let stored = match state.store.insert_profile(profile).await {
        Ok(stored) => stored,
        Err(e) => return store_failure("insert profile", &e),
    };

    let pool = match state
        .store
        .profiles_by_gender(target_gender(preferences.gender))
        .await
    {
        Ok(pool) => pool,
        Err(e) => return store_failure("fetch candidates", &e),
    };

    let result = state
        .matcher
        .find_matches(&preferences, &pool, Some(stored.id.as_str()));

    tracing::info!(
        "Profile {} stored with {} matches (from {} candidates)",
        stored.id,
        result.matches.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(ProfileMatchResponse {
        profile_id: stored.id,
        ideal_matches: result.matches.into_iter().map(IdealMatch::from).collect(),
    })
}
