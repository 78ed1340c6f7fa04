//! User entity model and DTOs.
//!
//! Players and staff are rows of the same `users` table; see
//! [`touchline_core::people::UserKind`] for the typed payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use touchline_core::error::CoreError;
use touchline_core::people::{full_name, UserKind};
use touchline_core::roles::Role;
use touchline_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub kind: String,
    pub position: Option<String>,
    pub jersey_number: Option<i16>,
    pub rating: Option<f32>,
    pub staff_function: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse()
    }

    /// Typed kind payload rebuilt from the nullable columns.
    pub fn kind_payload(&self) -> Result<UserKind, CoreError> {
        UserKind::from_columns(
            &self.kind,
            self.position.as_deref(),
            self.jersey_number,
            self.rating,
            self.staff_function.as_deref(),
        )
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub kind: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: full_name(&user.first_name, &user.last_name),
            role: user.role.clone(),
            kind: user.kind.clone(),
        }
    }
}

/// A player as listed in the squad and the assignment picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub jersey_number: Option<i16>,
    pub rating: f32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new player. Position values are validated by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub jersey_number: Option<i16>,
    /// Defaults to 5.0 if omitted.
    pub rating: Option<f32>,
}

/// DTO for updating an existing player. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlayer {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<i16>,
    pub rating: Option<f32>,
}

/// DTO for creating a staff account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaff {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub staff_function: String,
}
