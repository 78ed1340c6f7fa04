//! Route definitions for the `/matches` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{attendance, matches};
use crate::state::AppState;

/// Routes mounted at `/matches`.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create (also creates the match lineup)
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update
/// DELETE /{id}                         -> delete (admin only)
/// PUT    /{id}/score                   -> record_score
/// GET    /{id}/attendance              -> attendance::roll_call
/// PUT    /{id}/attendance/{player_id}  -> attendance::record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(matches::list).post(matches::create))
        .route(
            "/{id}",
            get(matches::get_by_id)
                .put(matches::update)
                .delete(matches::delete),
        )
        .route("/{id}/score", put(matches::record_score))
        .route("/{id}/attendance", get(attendance::roll_call))
        .route("/{id}/attendance/{player_id}", put(attendance::record))
}
