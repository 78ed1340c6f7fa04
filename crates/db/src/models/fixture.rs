//! Match entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use touchline_core::fixture::{format_score, match_result, MatchResult};
use touchline_core::types::{DbId, Timestamp};

/// A row from the `matches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Match {
    pub id: DbId,
    pub kickoff_at: Timestamp,
    pub opponent: String,
    pub venue: Option<String>,
    pub is_home: bool,
    pub goals_for: Option<i32>,
    pub goals_against: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Match {
    pub fn result(&self) -> MatchResult {
        match_result(self.goals_for, self.goals_against)
    }

    pub fn score(&self) -> Option<String> {
        format_score(self.goals_for, self.goals_against)
    }
}

/// Match with its derived score and result, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub fixture: Match,
    pub score: Option<String>,
    pub result: MatchResult,
}

impl From<Match> for MatchResponse {
    fn from(fixture: Match) -> Self {
        Self {
            score: fixture.score(),
            result: fixture.result(),
            fixture,
        }
    }
}

/// DTO for creating a new match.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMatch {
    pub kickoff_at: Timestamp,
    pub opponent: String,
    pub venue: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_home: Option<bool>,
}

/// DTO for updating an existing match. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMatch {
    pub kickoff_at: Option<Timestamp>,
    pub opponent: Option<String>,
    pub venue: Option<String>,
    pub is_home: Option<bool>,
}

/// Optional kickoff window for listing matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchListQuery {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
