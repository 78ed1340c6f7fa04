//! Role names and the role-gate check used by every protected handler.
//!
//! These must match the `role` CHECK constraint in the `users` migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COACH: &str = "coach";
pub const ROLE_PLAYER: &str = "player";

/// A user's role. Stored as lowercase text and embedded in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Coach,
    Player,
}

/// Roles allowed to manage rosters, matches and lineups.
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::Coach];

/// Roles allowed to perform destructive match operations.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

/// Every role; used by read-only endpoints open to any signed-in user.
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::Coach, Role::Player];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Coach => ROLE_COACH,
            Role::Player => ROLE_PLAYER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_COACH => Ok(Role::Coach),
            ROLE_PLAYER => Ok(Role::Player),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Check that `role` is one of `allowed`.
///
/// Returns [`CoreError::Forbidden`] naming the accepted roles otherwise.
pub fn ensure_role(role: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(CoreError::Forbidden(format!(
        "One of the following roles is required: {}",
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        for role in ALL_ROLES {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!("entraineur".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn staff_roles_admit_admin_and_coach() {
        assert!(ensure_role(Role::Admin, STAFF_ROLES).is_ok());
        assert!(ensure_role(Role::Coach, STAFF_ROLES).is_ok());
    }

    #[test]
    fn player_rejected_from_staff_routes() {
        let err = ensure_role(Role::Player, STAFF_ROLES).unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
        assert!(err.to_string().contains("admin, coach"));
    }

    #[test]
    fn coach_rejected_from_admin_routes() {
        assert!(ensure_role(Role::Coach, ADMIN_ROLES).is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Coach).unwrap(), "\"coach\"");
    }
}
