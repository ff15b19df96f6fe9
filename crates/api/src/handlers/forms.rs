//! Handlers for the product form state machine.
//!
//! The server keeps no form state: clients send the current form with each
//! event and receive the next one.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use karat_core::form::{FormEvent, ProductForm};
use karat_core::record::ProductRecord;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    #[serde(default)]
    pub form: ProductForm,
    pub event: FormEvent,
}

// ---------------------------------------------------------------------------
// POST /forms/from-record
// ---------------------------------------------------------------------------

/// Rebuild an editable form from a stored product.
pub async fn form_from_record(
    State(state): State<AppState>,
    Json(record): Json<ProductRecord>,
) -> AppResult<impl IntoResponse> {
    let form = ProductForm::from_record(record, &state.catalog);
    tracing::debug!(
        metals = form.selection.metals.len(),
        variants = form.variants.len(),
        "Form loaded from record"
    );
    Ok(Json(DataResponse { data: form }))
}

// ---------------------------------------------------------------------------
// POST /forms/transition
// ---------------------------------------------------------------------------

/// Apply one event to a form.
pub async fn apply_event(
    State(state): State<AppState>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let event_name = input.event.name();
    let next = input.form.apply(input.event, &state.catalog)?;
    tracing::debug!(event = event_name, variants = next.variants.len(), "Form event applied");
    Ok(Json(DataResponse { data: next }))
}
