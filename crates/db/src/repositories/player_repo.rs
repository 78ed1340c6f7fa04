//! Repository for player rows of the `users` table.

use sqlx::PgPool;
use touchline_core::people::{DEFAULT_RATING, KIND_PLAYER};
use touchline_core::roles::ROLE_PLAYER;
use touchline_core::types::DbId;

use crate::models::user::{CreatePlayer, Player, UpdatePlayer};

const COLUMNS: &str = "id, email, first_name, last_name, position, jersey_number, rating, \
                       created_at, updated_at";

/// Provides CRUD operations for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Insert a new player with the `player` role, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlayer,
        password_hash: &str,
    ) -> Result<Player, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (email, first_name, last_name, password_hash, role, kind,
                 position, jersey_number, rating)
             VALUES ($1, $2, $3, $4, '{ROLE_PLAYER}', '{KIND_PLAYER}', $5, $6, COALESCE($7, $8))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(password_hash)
            .bind(&input.position)
            .bind(input.jersey_number)
            .bind(input.rating)
            .bind(DEFAULT_RATING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND kind = '{KIND_PLAYER}'");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all players ordered by last name, then first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE kind = '{KIND_PLAYER}'
             ORDER BY last_name, first_name, id"
        );
        sqlx::query_as::<_, Player>(&query).fetch_all(pool).await
    }

    /// Update a player. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no player with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlayer,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                position = COALESCE($5, position),
                jersey_number = COALESCE($6, jersey_number),
                rating = COALESCE($7, rating)
             WHERE id = $1 AND kind = '{KIND_PLAYER}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.position)
            .bind(input.jersey_number)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete a player. Slots holding the player become unassigned.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(KIND_PLAYER)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Return the ids from `ids` that do not belong to a player, in input order.
    pub async fn find_missing(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = ANY($1) AND kind = $2")
                .bind(ids)
                .bind(KIND_PLAYER)
                .fetch_all(pool)
                .await?;
        let found: std::collections::HashSet<DbId> = found.into_iter().map(|(id,)| id).collect();
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }
}
