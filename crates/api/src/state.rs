use std::sync::Arc;

use touchline_core::lineup_service::LineupService;
use touchline_db::repositories::PgLineupStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: touchline_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Lineup service backed by this state's pool.
    pub fn lineups(&self) -> LineupService<PgLineupStore> {
        LineupService::new(PgLineupStore::new(self.pool.clone()))
    }
}
