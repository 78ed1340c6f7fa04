//! Route definitions for the `/formations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::formations;
use crate::state::AppState;

/// Routes mounted at `/formations`.
///
/// ```text
/// GET  /          -> list
/// POST /preview   -> preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(formations::list))
        .route("/preview", post(formations::preview))
}
