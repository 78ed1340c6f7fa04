//! Repository for the `presences` table.

use sqlx::PgPool;
use touchline_core::people::KIND_PLAYER;
use touchline_core::types::DbId;

use crate::models::presence::{Presence, RecordPresence, RollCallEntry};

const COLUMNS: &str = "id, match_id, player_id, status, arrived_at, comment, recorded_at, \
                       created_at, updated_at";

/// Provides attendance recording and the per-match roll call.
pub struct PresenceRepo;

impl PresenceRepo {
    /// Record a player's attendance for a match, replacing any earlier entry.
    ///
    /// Re-recording overwrites status, comment and arrival time and stamps
    /// a fresh `recorded_at`.
    pub async fn upsert(
        pool: &PgPool,
        match_id: DbId,
        player_id: DbId,
        input: &RecordPresence,
    ) -> Result<Presence, sqlx::Error> {
        let query = format!(
            "INSERT INTO presences (match_id, player_id, status, comment, arrived_at, recorded_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             ON CONFLICT (match_id, player_id) DO UPDATE SET
                status = EXCLUDED.status,
                comment = EXCLUDED.comment,
                arrived_at = EXCLUDED.arrived_at,
                recorded_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presence>(&query)
            .bind(match_id)
            .bind(player_id)
            .bind(&input.status)
            .bind(&input.comment)
            .bind(input.arrived_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        match_id: DbId,
        player_id: DbId,
    ) -> Result<Option<Presence>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM presences WHERE match_id = $1 AND player_id = $2");
        sqlx::query_as::<_, Presence>(&query)
            .bind(match_id)
            .bind(player_id)
            .fetch_optional(pool)
            .await
    }

    /// Every player of the squad with their attendance for `match_id`,
    /// ordered by last then first name.
    pub async fn roll_call(pool: &PgPool, match_id: DbId) -> Result<Vec<RollCallEntry>, sqlx::Error> {
        let query = format!(
            "SELECT u.id AS player_id,
                    u.first_name || ' ' || u.last_name AS player_name,
                    u.jersey_number,
                    u.position,
                    p.status, p.arrived_at, p.comment, p.recorded_at
             FROM users u
             LEFT JOIN presences p ON p.player_id = u.id AND p.match_id = $1
             WHERE u.kind = '{KIND_PLAYER}'
             ORDER BY u.last_name, u.first_name, u.id"
        );
        sqlx::query_as::<_, RollCallEntry>(&query)
            .bind(match_id)
            .fetch_all(pool)
            .await
    }
}
