//! HTTP API module - REST endpoints

mod generate;
mod mint;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::mint::Minter;
use crate::stability::StabilityClient;

/// Shared application state
///
/// Read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub stability: Arc<StabilityClient>,
    pub minter: Arc<Minter>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let stability = StabilityClient::new(&config.stability);
        if !stability.is_configured() {
            warn!("AI_API_KEY not set; /generate will fail provider authentication");
        }

        let minter = Minter::new(&config.pinata);
        if !minter.is_configured() {
            warn!("Pinata credentials not set; /makeNFT requests will fail");
        }

        Self {
            stability: Arc::new(stability),
            minter: Arc::new(minter),
        }
    }
}

/// Build the API router
pub fn router(config: &Config) -> Router {
    let state = AppState::new(config);

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(generate::router())
        .merge(mint::router())
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "mintd",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
