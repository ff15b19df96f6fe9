//! Route definitions for the variant matrix.
//!
//! Mounted at `/variants`.
//!
//! ```text
//! POST   /generate         generate_variants
//! POST   /payload          build_payload
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::variants;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(variants::generate_variants))
        .route("/payload", post(variants::build_payload))
}
