use actix_web::{web, HttpResponse, Responder};

use crate::core::{pick_pudding, target_gender, QUESTIONS};
use crate::models::{AnswerSet, HealthResponse, IdealMatch, MatchPreferences, QuizResultResponse};
use crate::routes::errors::{bad_request, store_failure};
use crate::routes::AppState;

/// Configure quiz routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/questions", web::get().to(list_questions))
        .route("/quiz/result", web::post().to(quiz_result));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/questions
async fn list_questions() -> impl Responder {
    HttpResponse::Ok().json(QUESTIONS)
}

/// Pudding result and ideal matches for a finished quiz
///
/// POST /api/quiz/result
///
/// Request body is the answer set keyed by question id:
/// ```json
/// { "gender": "female", "energy": "introvert", "hobby": "reading", ... }
/// ```
async fn quiz_result(
    state: web::Data<AppState>,
    answers: web::Json<AnswerSet>,
) -> impl Responder {
    let answers = answers.into_inner();

    if let Err(e) = answers.ensure_complete() {
        tracing::info!("Rejected incomplete quiz: {}", e);
        return bad_request("Incomplete answers", e.to_string());
    }

    let preferences = match MatchPreferences::try_from(&answers) {
        Ok(prefs) => prefs,
        Err(e) => return bad_request("Incomplete answers", e.to_string()),
    };

    let pudding = pick_pudding(&answers);

    let pool = match state
        .store
        .profiles_by_gender(target_gender(preferences.gender))
        .await
    {
        Ok(pool) => pool,
        Err(e) => return store_failure("fetch candidates", &e),
    };

    let result = state.matcher.find_matches(&preferences, &pool, None);

    tracing::info!(
        "Quiz result {} with {} matches (from {} candidates)",
        pudding.id.id(),
        result.matches.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(QuizResultResponse {
        pudding,
        ideal_matches: result.matches.into_iter().map(IdealMatch::from).collect(),
    })
}
