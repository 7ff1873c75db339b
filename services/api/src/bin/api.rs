//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{MessagesSummaryAdapter, SkyflowVaultAdapter},
    config::{Config, SummaryBackend},
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use chrono::Local;
use momo_core::{
    day_store::DayStore,
    demo,
    mock_summary::MockSummaryGenerator,
    ports::SummaryGenerator,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    // --- 2. Initialize Service Adapters ---
    let generator: Arc<dyn SummaryGenerator> = match config.summary_backend {
        SummaryBackend::Remote => Arc::new(MessagesSummaryAdapter::new(config.summary.clone())?),
        SummaryBackend::Mock => Arc::new(MockSummaryGenerator),
    };
    let vault = Arc::new(SkyflowVaultAdapter::new(
        reqwest::Client::new(),
        config.vault.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let mut store = DayStore::new();
    if config.seed_demo {
        demo::seed(&mut store, Local::now().date_naive());
        info!("Seeded {} demo days.", store.len());
    }
    let app_state = Arc::new(AppState::new(config.clone(), store, generator, vault));

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested.");
        }
        on_signal.cancel();
    });

    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}
