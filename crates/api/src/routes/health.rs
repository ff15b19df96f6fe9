use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Row counts of the loaded reference catalog.
#[derive(Serialize)]
pub struct CatalogSummary {
    pub metals: usize,
    pub purities: usize,
    pub tones: usize,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub catalog: CatalogSummary,
}

/// GET /health -- returns service status and catalog size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.catalog.metals.is_empty() {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog: CatalogSummary {
            metals: state.catalog.metals.len(),
            purities: state.catalog.purities.len(),
            tones: state.catalog.tones.len(),
        },
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
