//! Repository for login and account lookups on the `users` table.

use sqlx::PgPool;
use touchline_core::people::KIND_STAFF;
use touchline_core::roles::ROLE_ADMIN;
use touchline_core::types::DbId;

use crate::models::user::{CreateStaff, User};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, email, first_name, last_name, password_hash, role, kind, \
                                  position, jersey_number, rating, staff_function, \
                                  created_at, updated_at";

/// Provides account lookups for authentication.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, ignoring case.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a staff account, returning the created row.
    pub async fn create_staff(pool: &PgPool, input: &CreateStaff) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash, role, kind, staff_function)
             VALUES ($1, $2, $3, $4, $5, '{KIND_STAFF}', $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.staff_function)
            .fetch_one(pool)
            .await
    }

    /// Whether at least one admin account exists.
    pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE role = $1)")
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
