//! Route definitions for the `/lineups` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::lineups;
use crate::state::AppState;

/// Routes mounted at `/lineups`. All require a staff role.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// PUT    /{id}/assignments          -> update_assignments
/// PUT    /{id}/formation            -> change_formation
/// POST   /{id}/formation/preview    -> preview_formation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lineups::list).post(lineups::create))
        .route(
            "/{id}",
            get(lineups::get_by_id)
                .put(lineups::update)
                .delete(lineups::delete),
        )
        .route("/{id}/assignments", put(lineups::update_assignments))
        .route("/{id}/formation", put(lineups::change_formation))
        .route("/{id}/formation/preview", post(lineups::preview_formation))
}
