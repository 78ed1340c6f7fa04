//! Repository for the `matches` table.

use sqlx::PgPool;
use touchline_core::types::DbId;

use crate::models::fixture::{CreateMatch, Match, MatchListQuery, UpdateMatch};

const COLUMNS: &str = "id, kickoff_at, opponent, venue, is_home, goals_for, goals_against, \
                       created_at, updated_at";

/// Provides CRUD operations for matches.
pub struct MatchRepo;

impl MatchRepo {
    /// Insert a new match inside an open transaction.
    ///
    /// Match creation also bootstraps a lineup, so the caller owns the
    /// transaction and commits both together.
    pub async fn create_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateMatch,
    ) -> Result<Match, sqlx::Error> {
        let query = format!(
            "INSERT INTO matches (kickoff_at, opponent, venue, is_home)
             VALUES ($1, $2, $3, COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Match>(&query)
            .bind(input.kickoff_at)
            .bind(&input.opponent)
            .bind(&input.venue)
            .bind(input.is_home)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Match>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE id = $1");
        sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List matches by kickoff, optionally bounded by `from` and `to` (inclusive).
    pub async fn list(pool: &PgPool, params: &MatchListQuery) -> Result<Vec<Match>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM matches
             WHERE ($1::timestamptz IS NULL OR kickoff_at >= $1)
               AND ($2::timestamptz IS NULL OR kickoff_at <= $2)
             ORDER BY kickoff_at"
        );
        sqlx::query_as::<_, Match>(&query)
            .bind(params.from)
            .bind(params.to)
            .fetch_all(pool)
            .await
    }

    /// Update a match. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMatch,
    ) -> Result<Option<Match>, sqlx::Error> {
        let query = format!(
            "UPDATE matches SET
                kickoff_at = COALESCE($2, kickoff_at),
                opponent = COALESCE($3, opponent),
                venue = COALESCE($4, venue),
                is_home = COALESCE($5, is_home)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .bind(input.kickoff_at)
            .bind(&input.opponent)
            .bind(&input.venue)
            .bind(input.is_home)
            .fetch_optional(pool)
            .await
    }

    /// Record the final score. Returns `None` if the match does not exist.
    pub async fn record_score(
        pool: &PgPool,
        id: DbId,
        goals_for: i32,
        goals_against: i32,
    ) -> Result<Option<Match>, sqlx::Error> {
        let query = format!(
            "UPDATE matches SET goals_for = $2, goals_against = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .bind(goals_for)
            .bind(goals_against)
            .fetch_optional(pool)
            .await
    }

    /// Delete a match; its lineups go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
