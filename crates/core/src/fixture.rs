//! Match fixtures: derived score and result, and input validation.

use serde::Serialize;

use crate::error::CoreError;

/// Maximum length of the opponent name and of the venue.
pub const MAX_OPPONENT_LEN: usize = 100;
pub const MAX_VENUE_LEN: usize = 200;

/// Outcome of a match from the club's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    ToPlay,
    Win,
    Loss,
    Draw,
}

/// Derive the result. A match stays `ToPlay` until both goal counts are known.
pub fn match_result(goals_for: Option<i32>, goals_against: Option<i32>) -> MatchResult {
    match (goals_for, goals_against) {
        (Some(f), Some(a)) if f > a => MatchResult::Win,
        (Some(f), Some(a)) if f < a => MatchResult::Loss,
        (Some(_), Some(_)) => MatchResult::Draw,
        _ => MatchResult::ToPlay,
    }
}

/// Score string in "for-against" form, e.g. `"2-1"`.
pub fn format_score(goals_for: Option<i32>, goals_against: Option<i32>) -> Option<String> {
    match (goals_for, goals_against) {
        (Some(f), Some(a)) => Some(format!("{f}-{a}")),
        _ => None,
    }
}

/// Goal counts must be non-negative.
pub fn validate_goals(goals_for: i32, goals_against: i32) -> Result<(), CoreError> {
    if goals_for < 0 || goals_against < 0 {
        return Err(CoreError::Validation(
            "Goal counts must not be negative".to_string(),
        ));
    }
    Ok(())
}
