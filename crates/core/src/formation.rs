//! Formation codes such as `"4-4-2"`.
//!
//! A code lists the outfield line sizes from defence to attack; the
//! goalkeeper is implicit. Only the syntax is validated: each segment is
//! one or two digits. The segment sum is not checked against 11, so
//! `"9-9-9"` parses. Callers that need exactly eleven players must check
//! [`FormationDescriptor::outfield_count`] themselves.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::lineup::LineupError;

/// Formation used when nothing else is specified (e.g. match bootstrap).
pub const DEFAULT_FORMATION: &str = "4-4-2";

static FORMATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{1,2}$").expect("formation pattern is a valid regex")
});

/// A parsed formation code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FormationDescriptor {
    pub defenders: u8,
    pub midfielders: u8,
    pub attackers: u8,
    /// The code as given, used as the layout library key.
    pub code: String,
}

impl FormationDescriptor {
    /// Parse and validate a formation code.
    pub fn parse(code: &str) -> Result<Self, LineupError> {
        if !FORMATION_RE.is_match(code) {
            return Err(LineupError::InvalidFormationFormat(code.to_string()));
        }

        let mut lines = code.split('-').map(str::parse::<u8>);
        // The regex guarantees three segments of at most two digits each.
        match (lines.next(), lines.next(), lines.next()) {
            (Some(Ok(defenders)), Some(Ok(midfielders)), Some(Ok(attackers))) => Ok(Self {
                defenders,
                midfielders,
                attackers,
                code: code.to_string(),
            }),
            _ => Err(LineupError::InvalidFormationFormat(code.to_string())),
        }
    }

    /// Sum of the three outfield lines. Informational only.
    pub fn outfield_count(&self) -> u16 {
        u16::from(self.defenders) + u16::from(self.midfielders) + u16::from(self.attackers)
    }
}

impl FromStr for FormationDescriptor {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FormationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_common_formations() {
        let f = FormationDescriptor::parse("4-4-2").unwrap();
        assert_eq!((f.defenders, f.midfielders, f.attackers), (4, 4, 2));
        assert_eq!(f.code, "4-4-2");
        assert_eq!(f.outfield_count(), 10);

        let f = FormationDescriptor::parse("3-5-2").unwrap();
        assert_eq!((f.defenders, f.midfielders, f.attackers), (3, 5, 2));
    }

    #[test]
    fn every_one_or_two_digit_triple_parses() {
        for d in [0u8, 1, 4, 9, 10, 99] {
            for m in [0u8, 3, 45] {
                for a in [1u8, 2, 12] {
                    let code = format!("{d}-{m}-{a}");
                    let f = FormationDescriptor::parse(&code).unwrap();
                    assert_eq!((f.defenders, f.midfielders, f.attackers), (d, m, a));
                }
            }
        }
    }

    #[test]
    fn leading_zero_segments_parse() {
        let f = FormationDescriptor::parse("04-4-02").unwrap();
        assert_eq!((f.defenders, f.midfielders, f.attackers), (4, 4, 2));
        assert_eq!(f.code, "04-4-02");
    }

    #[test]
    fn sum_is_not_enforced() {
        let f = FormationDescriptor::parse("9-9-9").unwrap();
        assert_eq!(f.outfield_count(), 27);
    }

    #[test]
    fn malformed_codes_rejected() {
        for bad in [
            "", "4-4", "4-2-3-1", "442", "4-4-2 ", " 4-4-2", "a-b-c", "100-4-2", "4--2", "-4-4-2",
            "4-4-2-", "4,4,2", "４-4-2",
        ] {
            assert_matches!(
                FormationDescriptor::parse(bad),
                Err(LineupError::InvalidFormationFormat(code)) if code == bad,
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_str_and_display() {
        let f: FormationDescriptor = "4-3-3".parse().unwrap();
        assert_eq!(f.to_string(), "4-3-3");
    }
}
