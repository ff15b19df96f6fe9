//! Handlers for the read-only reference catalog.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use karat_core::catalog::{Metal, MetalPurity, MetalTone};
use karat_core::error::CoreError;
use karat_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A metal together with the purities and tones that belong to it.
#[derive(Debug, Serialize)]
pub struct MetalDetail {
    #[serde(flatten)]
    pub metal: Metal,
    pub purities: Vec<MetalPurity>,
    pub tones: Vec<MetalTone>,
}

// ---------------------------------------------------------------------------
// GET /catalog
// ---------------------------------------------------------------------------

/// Return the whole reference catalog.
pub async fn get_catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::debug!(metals = state.catalog.metals.len(), "Serving reference catalog");
    Ok(Json(DataResponse {
        data: state.catalog.as_ref().clone(),
    }))
}

// ---------------------------------------------------------------------------
// GET /catalog/metals/{id}
// ---------------------------------------------------------------------------

/// Return one metal with its purities and tones.
pub async fn get_metal(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!(
            "Metal id must be positive, got {id}"
        )));
    }

    let catalog = &state.catalog;
    let metal = catalog
        .metal(id)
        .cloned()
        .ok_or(CoreError::NotFound { entity: "Metal", id })?;

    Ok(Json(DataResponse {
        data: MetalDetail {
            metal,
            purities: catalog.purities_for(id).cloned().collect(),
            tones: catalog.tones_for(id).cloned().collect(),
        },
    }))
}
