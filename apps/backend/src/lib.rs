pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::services::comparison::ComparisonService;
use crate::services::passages::PassageLibrary;

/// Request bodies above this size are rejected before parsing.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub comparison: Arc<ComparisonService>,
    pub passages: Arc<PassageLibrary>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!("Building comparison engine...");
    let comparison = ComparisonService::new(config.comparison.clone())?;

    let passages = match &config.passages_path {
        Some(path) => PassageLibrary::load(path).await?,
        None => {
            tracing::info!("READALONG_PASSAGES not set, serving without passages");
            PassageLibrary::default()
        }
    };

    let state = AppState {
        comparison: Arc::new(comparison),
        passages: Arc::new(passages),
    };

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Comparison routes
        .route("/api/compare", post(routes::compare::compare))
        .route("/api/compare/batch", post(routes::compare::batch))
        // Passage routes
        .route("/api/passages", get(routes::passages::list))
        .route("/api/passages/:id", get(routes::passages::get))
        .route("/api/passages/:id/attempt", post(routes::passages::attempt))
        // Settings routes
        .route("/api/settings", get(routes::settings::get))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
