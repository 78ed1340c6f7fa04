//! Match-day attendance: one status per player and match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Longest free-text comment kept on an attendance entry.
pub const MAX_ATTENDANCE_COMMENT_LEN: usize = 500;

/// Whether a player turned up for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Injured,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Injured => "injured",
        }
    }

    /// Arrival time to store when this status is recorded at `now`.
    ///
    /// Only `Present` stamps an arrival; every other status clears it.
    pub fn arrival_at(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            AttendanceStatus::Present => Some(now),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "injured" => Ok(AttendanceStatus::Injured),
            other => Err(CoreError::Validation(format!(
                "Unknown attendance status '{other}'"
            ))),
        }
    }
}
