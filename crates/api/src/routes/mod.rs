pub mod auth;
pub mod formations;
pub mod health;
pub mod lineups;
pub mod matches;
pub mod players;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current identity (requires auth)
///
/// /players                                         list, create (staff)
/// /players/{id}                                    get, update, delete (staff)
///
/// /matches                                         list (auth), create (staff)
/// /matches/{id}                                    get (auth), update (staff), delete (admin)
/// /matches/{id}/score                              record score (staff)
/// /matches/{id}/attendance                         squad roll call (staff)
/// /matches/{id}/attendance/{player_id}             record attendance (staff)
///
/// /formations                                      supported codes (staff)
/// /formations/preview                              layout preview (staff)
///
/// /lineups                                         list, create (staff)
/// /lineups/{id}                                    get, update, delete (staff)
/// /lineups/{id}/assignments                        replace assignments (staff)
/// /lineups/{id}/formation                          change formation (staff)
/// /lineups/{id}/formation/preview                  preview formation (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/players", players::router())
        .nest("/matches", matches::router())
        .nest("/formations", formations::router())
        .nest("/lineups", lineups::router())
}
