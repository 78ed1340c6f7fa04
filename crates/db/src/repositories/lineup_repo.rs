//! Read-side queries over `lineups` and `lineup_slots`.
//!
//! Writes go through [`super::PgLineupStore`] so they stay version-checked.

use sqlx::PgPool;
use touchline_core::types::{DbId, LineupId};

use crate::begin_snapshot;
use crate::models::lineup::{LineupDetail, LineupRow, LineupSummary, SlotDetail};

const COLUMNS: &str = "id, name, formation, match_id, version, created_at, updated_at";

const SUMMARY_SELECT: &str = "SELECT l.id, l.name, l.formation, l.match_id,
        m.opponent, m.kickoff_at,
        COUNT(s.player_id) AS assigned_count,
        COUNT(s.id) AS slot_count,
        l.version, l.created_at
     FROM lineups l
     LEFT JOIN matches m ON m.id = l.match_id
     LEFT JOIN lineup_slots s ON s.lineup_id = l.id";

/// Provides the lineup read models.
pub struct LineupRepo;

impl LineupRepo {
    pub async fn find_by_id(pool: &PgPool, id: LineupId) -> Result<Option<LineupRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lineups WHERE id = $1");
        sqlx::query_as::<_, LineupRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All lineups, newest first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<LineupSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             GROUP BY l.id, m.id
             ORDER BY l.created_at DESC, l.id DESC"
        );
        sqlx::query_as::<_, LineupSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Lineups attached to one match, newest first.
    pub async fn list_for_match(
        pool: &PgPool,
        match_id: DbId,
    ) -> Result<Vec<LineupSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE l.match_id = $1
             GROUP BY l.id, m.id
             ORDER BY l.created_at DESC, l.id DESC"
        );
        sqlx::query_as::<_, LineupSummary>(&query)
            .bind(match_id)
            .fetch_all(pool)
            .await
    }

    /// Lineup plus its ordered slots joined with player details.
    pub async fn find_detail(
        pool: &PgPool,
        id: LineupId,
    ) -> Result<Option<LineupDetail>, sqlx::Error> {
        let mut tx = begin_snapshot(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM lineups WHERE id = $1");
        let lineup = sqlx::query_as::<_, LineupRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(lineup) = lineup else {
            return Ok(None);
        };

        let slots = sqlx::query_as::<_, SlotDetail>(
            "SELECT s.id, s.label, s.x, s.y, s.position_order, s.player_id,
                    u.first_name || ' ' || u.last_name AS player_name,
                    u.jersey_number,
                    u.position AS player_position
             FROM lineup_slots s
             LEFT JOIN users u ON u.id = s.player_id
             WHERE s.lineup_id = $1
             ORDER BY s.position_order",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Some(LineupDetail { lineup, slots }))
    }
}
