use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use little_pudding::config::{LoggingSettings, Settings, StoreBackend};
use little_pudding::core::Matcher;
use little_pudding::models::ScoringWeights;
use little_pudding::routes::{self, handle_query_payload_error, AppState};
use little_pudding::services::{GeminiClient, InMemoryProfileStore, ProfileStore, SupabaseClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// `RUST_LOG` wins over `LOG_LEVEL`, which wins over `logging.level`.
/// `LOG_FORMAT=pretty` (or `logging.format = "pretty"`) switches to multi-line output.
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(io_error("Configuration error", e));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Little Pudding service...");

    let gemini = GeminiClient::new(
        settings.gemini.endpoint.clone(),
        settings.gemini.model.clone(),
        settings.gemini.api_key.clone(),
        settings.gemini.timeout(),
        settings.gemini.retry_policy(),
    )
    .map_err(|e| {
        error!("Failed to build Gemini client: {}", e);
        io_error("Gemini client error", e)
    })?;

    if gemini.has_api_key() {
        info!(
            "Gemini client initialized (model: {}, attempts: {})",
            settings.gemini.model, settings.gemini.max_attempts
        );
    } else {
        warn!("GEMINI_API_KEY is not set, image endpoints will return errors");
    }

    let store: Arc<dyn ProfileStore> = match settings.store.backend {
        StoreBackend::Supabase => {
            let client = SupabaseClient::new(
                settings.store.supabase_url.clone().unwrap_or_default(),
                settings.store.service_role_key.clone().unwrap_or_default(),
                settings.store.profiles_table.clone(),
                settings.store.images_bucket.clone(),
                Duration::from_secs(settings.store.timeout_secs),
            )
            .map_err(|e| {
                error!("Failed to build Supabase client: {}", e);
                io_error("Supabase client error", e)
            })?;

            if !client.health_check().await {
                warn!("Supabase is not reachable yet, continuing in degraded mode");
            }

            info!("Supabase profile store initialized (table: {})", settings.store.profiles_table);
            Arc::new(client)
        }
        StoreBackend::Memory => {
            info!("Using in-memory profile store with the ideal pudding pool");
            Arc::new(InMemoryProfileStore::with_seed_profiles())
        }
    };

    // Initialize matcher with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights, settings.matching.max_matches);

    info!(
        "Matcher initialized with weights: {:?}, limit: {}",
        weights, settings.matching.max_matches
    );

    // Build application state
    let app_state = AppState {
        gemini: Arc::new(gemini),
        store,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
