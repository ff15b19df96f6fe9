//! Handlers for variant matrix generation and the save payload.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use karat_core::matrix::materialize::{regenerate, Regeneration};
use karat_core::payload::build_save_payload;
use karat_core::selection::VariantSelection;
use karat_core::types::Timestamp;
use karat_core::variant::Variant;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub selection: VariantSelection,
    /// Variants currently shown to the user, used for carry-over.
    #[serde(default)]
    pub previous: Vec<Variant>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub variants: Vec<Variant>,
    /// False when the selection had nothing to multiply and `previous` was
    /// returned unchanged.
    pub regenerated: bool,
    /// Variants still missing a metal weight or diamond count.
    pub incomplete: usize,
    pub generated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct PayloadRequest {
    pub variants: Vec<Variant>,
}

// ---------------------------------------------------------------------------
// POST /variants/generate
// ---------------------------------------------------------------------------

/// Regenerate the variant matrix for a selection.
pub async fn generate_variants(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    input.selection.validate_against(&state.catalog)?;

    let outcome = regenerate(&input.selection, &input.previous, &state.catalog)?;
    let regenerated = matches!(outcome, Regeneration::Regenerated(_));
    let variants = outcome.into_variants(input.previous);
    let incomplete = variants
        .iter()
        .filter(|v| !v.missing_fields().is_empty())
        .count();

    tracing::info!(
        variants = variants.len(),
        regenerated,
        incomplete,
        base_sku = %input.selection.base_sku,
        "Variant matrix generated"
    );

    Ok(Json(DataResponse {
        data: GenerateResponse {
            variants,
            regenerated,
            incomplete,
            generated_at: chrono::Utc::now(),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /variants/payload
// ---------------------------------------------------------------------------

/// Validate variants and return the normalized save payload.
pub async fn build_payload(Json(input): Json<PayloadRequest>) -> AppResult<impl IntoResponse> {
    let payload = build_save_payload(&input.variants)?;
    tracing::info!(variants = payload.len(), "Save payload built");
    Ok(Json(DataResponse { data: payload }))
}
