//! Match attendance model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use touchline_core::types::{DbId, Timestamp};

/// A row from the `presences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Presence {
    pub id: DbId,
    pub match_id: DbId,
    pub player_id: DbId,
    pub status: String,
    /// Set only while the status is `present`.
    pub arrived_at: Option<Timestamp>,
    pub comment: Option<String>,
    pub recorded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a player's attendance. The status is validated by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPresence {
    pub status: String,
    pub comment: Option<String>,
    pub arrived_at: Option<Timestamp>,
}

/// One squad member on a match roll call; status fields are `None` until recorded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RollCallEntry {
    pub player_id: DbId,
    pub player_name: String,
    pub jersey_number: Option<i16>,
    pub position: String,
    pub status: Option<String>,
    pub arrived_at: Option<Timestamp>,
    pub comment: Option<String>,
    pub recorded_at: Option<Timestamp>,
}
