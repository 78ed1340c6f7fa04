//! Club members: players and staff as one tagged union.
//!
//! Both kinds share the identity fields (email, names, credential hash,
//! role) stored on the `users` row; the kind-specific payload lives in
//! [`UserKind`] and maps to the `kind` discriminator column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const KIND_PLAYER: &str = "player";
pub const KIND_STAFF: &str = "staff";

/// Lowest and highest jersey number a player may wear.
pub const JERSEY_MIN: i16 = 1;
pub const JERSEY_MAX: i16 = 99;

/// Overall rating bounds and the default for new players.
pub const RATING_MIN: f32 = 0.0;
pub const RATING_MAX: f32 = 10.0;
pub const DEFAULT_RATING: f32 = 5.0;

/// A player's preferred line on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl PlayerPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerPosition::Goalkeeper => "goalkeeper",
            PlayerPosition::Defender => "defender",
            PlayerPosition::Midfielder => "midfielder",
            PlayerPosition::Attacker => "attacker",
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goalkeeper" => Ok(PlayerPosition::Goalkeeper),
            "defender" => Ok(PlayerPosition::Defender),
            "midfielder" => Ok(PlayerPosition::Midfielder),
            "attacker" => Ok(PlayerPosition::Attacker),
            other => Err(CoreError::Validation(format!(
                "Unknown player position '{other}'"
            ))),
        }
    }
}

/// A staff member's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffFunction {
    HeadCoach,
    AssistantCoach,
    FitnessCoach,
    Physio,
}

impl StaffFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffFunction::HeadCoach => "head_coach",
            StaffFunction::AssistantCoach => "assistant_coach",
            StaffFunction::FitnessCoach => "fitness_coach",
            StaffFunction::Physio => "physio",
        }
    }
}

impl FromStr for StaffFunction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head_coach" => Ok(StaffFunction::HeadCoach),
            "assistant_coach" => Ok(StaffFunction::AssistantCoach),
            "fitness_coach" => Ok(StaffFunction::FitnessCoach),
            "physio" => Ok(StaffFunction::Physio),
            other => Err(CoreError::Validation(format!(
                "Unknown staff function '{other}'"
            ))),
        }
    }
}

/// Kind-specific payload of a club member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserKind {
    Player {
        position: PlayerPosition,
        jersey_number: Option<i16>,
        rating: f32,
    },
    Staff {
        function: StaffFunction,
    },
}

impl UserKind {
    /// Value of the `kind` discriminator column.
    pub fn discriminator(&self) -> &'static str {
        match self {
            UserKind::Player { .. } => KIND_PLAYER,
            UserKind::Staff { .. } => KIND_STAFF,
        }
    }

    /// Rebuild the payload from the nullable per-kind columns of a `users` row.
    pub fn from_columns(
        kind: &str,
        position: Option<&str>,
        jersey_number: Option<i16>,
        rating: Option<f32>,
        function: Option<&str>,
    ) -> Result<Self, CoreError> {
        match kind {
            KIND_PLAYER => {
                let position = position
                    .ok_or_else(|| CoreError::Internal("player row without position".into()))?
                    .parse()?;
                Ok(UserKind::Player {
                    position,
                    jersey_number,
                    rating: rating.unwrap_or(DEFAULT_RATING),
                })
            }
            KIND_STAFF => {
                let function = function
                    .ok_or_else(|| CoreError::Internal("staff row without function".into()))?
                    .parse()?;
                Ok(UserKind::Staff { function })
            }
            other => Err(CoreError::Internal(format!("unknown user kind '{other}'"))),
        }
    }
}

/// Display name as shown on the pitch diagram ("First Last").
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Validate an optional jersey number against the allowed range.
pub fn validate_jersey_number(number: Option<i16>) -> Result<(), CoreError> {
    match number {
        Some(n) if !(JERSEY_MIN..=JERSEY_MAX).contains(&n) => Err(CoreError::Validation(format!(
            "Jersey number must be between {JERSEY_MIN} and {JERSEY_MAX} (got {n})"
        ))),
        _ => Ok(()),
    }
}

/// Validate a player rating.
pub fn validate_rating(rating: f32) -> Result<(), CoreError> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(())
}
