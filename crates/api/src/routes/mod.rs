pub mod catalog;
pub mod forms;
pub mod health;
pub mod variants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /catalog                         full reference catalog
/// /catalog/metals/{id}             one metal with purities and tones
///
/// /variants/generate               regenerate the variant matrix (POST)
/// /variants/payload                validate and build the save payload (POST)
///
/// /forms/from-record               load a stored product into a form (POST)
/// /forms/transition                apply one form event (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/variants", variants::router())
        .nest("/forms", forms::router())
}
