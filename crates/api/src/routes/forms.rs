//! Route definitions for the product form state machine.
//!
//! Mounted at `/forms`.
//!
//! ```text
//! POST   /from-record      form_from_record
//! POST   /transition       apply_event
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/from-record", post(forms::form_from_record))
        .route("/transition", post(forms::apply_event))
}
