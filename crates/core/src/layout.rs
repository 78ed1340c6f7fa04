//! Slot layout generator: formation code to ordered pitch slots.
//!
//! Coordinates are percentages of the pitch, `(0, 0)` being the corner on
//! the club's own goal line. The goalkeeper stands at `(50, 5)` and the
//! lines move up the y-axis from defence through midfield to attack.
//!
//! Common formations have hand-tuned layouts in [`CURATED_LAYOUTS`]. Any
//! other syntactically valid code gets the generic zig-zag from
//! [`fallback_layout`], which always yields eleven slots and does not look
//! at the requested line sizes.

use serde::Serialize;

use crate::formation::FormationDescriptor;
use crate::lineup::LineupError;

/// One position of a layout, before any player is bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotTemplate {
    pub label: String,
    pub x: i16,
    pub y: i16,
    /// 1-based position within the layout.
    pub position_order: i16,
}

type Row = (&'static str, i16, i16);

const GOALKEEPER: Row = ("Gardien", 50, 5);

const LAYOUT_4_4_2: &[Row] = &[
    GOALKEEPER,
    ("Défenseur Droit", 75, 25),
    ("Défenseur Central Droit", 60, 25),
    ("Défenseur Central Gauche", 40, 25),
    ("Défenseur Gauche", 25, 25),
    ("Milieu Droit", 75, 45),
    ("Milieu Central Droit", 60, 45),
    ("Milieu Central Gauche", 40, 45),
    ("Milieu Gauche", 25, 45),
    ("Attaquant Droit", 70, 70),
    ("Attaquant Gauche", 30, 70),
];

const LAYOUT_4_3_3: &[Row] = &[
    GOALKEEPER,
    ("Défenseur Droit", 75, 20),
    ("Défenseur Central Droit", 60, 20),
    ("Défenseur Central Gauche", 40, 20),
    ("Défenseur Gauche", 25, 20),
    ("Milieu Défensif", 50, 40),
    ("Milieu Droit", 70, 40),
    ("Milieu Gauche", 30, 40),
    ("Ailier Droit", 80, 65),
    ("Avant-Centre", 50, 75),
    ("Ailier Gauche", 20, 65),
];

const LAYOUT_3_5_2: &[Row] = &[
    GOALKEEPER,
    ("Défenseur Droit", 75, 20),
    ("Défenseur Central", 50, 20),
    ("Défenseur Gauche", 25, 20),
    ("Milieu Droit", 80, 40),
    ("Milieu Central Droit", 60, 40),
    ("Milieu Central", 50, 40),
    ("Milieu Central Gauche", 40, 40),
    ("Milieu Gauche", 20, 40),
    ("Attaquant Droit", 60, 70),
    ("Attaquant Gauche", 40, 70),
];

const LAYOUT_3_4_3: &[Row] = &[
    GOALKEEPER,
    ("Défenseur Droit", 75, 20),
    ("Défenseur Central", 50, 20),
    ("Défenseur Gauche", 25, 20),
    ("Milieu Droit", 80, 42),
    ("Milieu Central Droit", 60, 42),
    ("Milieu Central Gauche", 40, 42),
    ("Milieu Gauche", 20, 42),
    ("Ailier Droit", 80, 68),
    ("Avant-Centre", 50, 75),
    ("Ailier Gauche", 20, 68),
];

const LAYOUT_5_3_2: &[Row] = &[
    GOALKEEPER,
    ("Latéral Droit", 85, 25),
    ("Défenseur Central Droit", 67, 20),
    ("Défenseur Central", 50, 20),
    ("Défenseur Central Gauche", 33, 20),
    ("Latéral Gauche", 15, 25),
    ("Milieu Droit", 70, 42),
    ("Milieu Central", 50, 42),
    ("Milieu Gauche", 30, 42),
    ("Attaquant Droit", 60, 70),
    ("Attaquant Gauche", 40, 70),
];

const LAYOUT_4_5_1: &[Row] = &[
    GOALKEEPER,
    ("Défenseur Droit", 75, 22),
    ("Défenseur Central Droit", 60, 22),
    ("Défenseur Central Gauche", 40, 22),
    ("Défenseur Gauche", 25, 22),
    ("Milieu Droit", 80, 42),
    ("Milieu Central Droit", 65, 42),
    ("Milieu Central", 50, 40),
    ("Milieu Central Gauche", 35, 42),
    ("Milieu Gauche", 20, 42),
    ("Avant-Centre", 50, 72),
];

/// Hand-tuned layouts keyed by exact formation code, in switcher order.
pub const CURATED_LAYOUTS: &[(&str, &[Row])] = &[
    ("4-4-2", LAYOUT_4_4_2),
    ("4-3-3", LAYOUT_4_3_3),
    ("3-5-2", LAYOUT_3_5_2),
    ("3-4-3", LAYOUT_3_4_3),
    ("5-3-2", LAYOUT_5_3_2),
    ("4-5-1", LAYOUT_4_5_1),
];

/// Number of slots produced by the generic layout.
pub const FALLBACK_SLOT_COUNT: usize = 11;

/// Label given to the first slot of the generic layout.
pub const FALLBACK_GOALKEEPER_LABEL: &str = "Goalkeeper";

/// Formation codes with a curated layout, for the formation switcher.
pub fn supported_formations() -> Vec<&'static str> {
    CURATED_LAYOUTS.iter().map(|(code, _)| *code).collect()
}

/// Whether `code` has a hand-tuned layout (as opposed to the zig-zag fallback).
pub fn has_curated_layout(code: &str) -> bool {
    CURATED_LAYOUTS.iter().any(|(key, _)| *key == code)
}

/// Produce the ordered slot templates for a syntactically valid code.
///
/// Pure and deterministic. Codes are matched exactly, so `"04-4-2"` uses
/// the fallback even though it describes the same lines as `"4-4-2"`.
pub fn generate_slots(code: &str) -> Vec<SlotTemplate> {
    match CURATED_LAYOUTS.iter().find(|(key, _)| *key == code) {
        Some((_, rows)) => rows
            .iter()
            .zip(1i16..)
            .map(|(&(label, x, y), position_order)| SlotTemplate {
                label: label.to_string(),
                x,
                y,
                position_order,
            })
            .collect(),
        None => fallback_layout(),
    }
}

/// Parse `code`, then generate its layout.
pub fn layout_for(code: &str) -> Result<Vec<SlotTemplate>, LineupError> {
    let formation = FormationDescriptor::parse(code)?;
    Ok(generate_slots(&formation.code))
}

/// Generic alternating left/right staircase of eleven slots.
///
/// For 0-based `i`: `y = clamp(10 + 8i, 5, 85)` and
/// `x = clamp(50 ± 20 * (i / 2 + 1), 10, 90)`, `+` for even `i`.
pub fn fallback_layout() -> Vec<SlotTemplate> {
    (0..FALLBACK_SLOT_COUNT as i16)
        .map(|i| {
            let side = if i % 2 == 0 { 1 } else { -1 };
            let x = (50 + side * 20 * (i / 2 + 1)).clamp(10, 90);
            let y = (10 + i * 8).clamp(5, 85);
            let label = if i == 0 {
                FALLBACK_GOALKEEPER_LABEL.to_string()
            } else {
                format!("Player {}", i + 1)
            };
            SlotTemplate {
                label,
                x,
                y,
                position_order: i + 1,
            }
        })
        .collect()
}
