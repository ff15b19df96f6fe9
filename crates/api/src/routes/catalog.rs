//! Route definitions for the reference catalog.
//!
//! Mounted at `/catalog`.
//!
//! ```text
//! GET    /                 get_catalog
//! GET    /metals/{id}      get_metal
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::get_catalog))
        .route("/metals/{id}", get(catalog::get_metal))
}
