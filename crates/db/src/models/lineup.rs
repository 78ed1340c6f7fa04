//! Lineup rows and the read models served to the pitch editor.

use serde::Serialize;
use sqlx::FromRow;
use touchline_core::lineup::Slot;
use touchline_core::types::{DbId, LineupId, SlotId, Timestamp};

/// A row from the `lineups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LineupRow {
    pub id: LineupId,
    pub name: String,
    pub formation: String,
    pub match_id: Option<DbId>,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `lineup_slots` table.
#[derive(Debug, Clone, FromRow)]
pub struct SlotRow {
    pub id: SlotId,
    pub lineup_id: LineupId,
    pub label: String,
    pub x: i16,
    pub y: i16,
    pub position_order: i16,
    pub player_id: Option<DbId>,
}

impl From<SlotRow> for Slot {
    fn from(row: SlotRow) -> Self {
        Slot {
            id: row.id,
            label: row.label,
            x: row.x,
            y: row.y,
            player_id: row.player_id,
            position_order: row.position_order,
        }
    }
}

/// Lineup list entry with match context and how many slots are filled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LineupSummary {
    pub id: LineupId,
    pub name: String,
    pub formation: String,
    pub match_id: Option<DbId>,
    pub opponent: Option<String>,
    pub kickoff_at: Option<Timestamp>,
    pub assigned_count: i64,
    pub slot_count: i64,
    pub version: i32,
    pub created_at: Timestamp,
}

/// A slot joined with the player bound to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotDetail {
    pub id: SlotId,
    pub label: String,
    pub x: i16,
    pub y: i16,
    pub position_order: i16,
    pub player_id: Option<DbId>,
    pub player_name: Option<String>,
    pub jersey_number: Option<i16>,
    pub player_position: Option<String>,
}

/// Everything the pitch editor needs to render one lineup.
#[derive(Debug, Clone, Serialize)]
pub struct LineupDetail {
    #[serde(flatten)]
    pub lineup: LineupRow,
    pub slots: Vec<SlotDetail>,
}
