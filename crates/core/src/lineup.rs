//! The lineup aggregate: a named, formation-bound set of pitch slots.
//!
//! Invariants held by every [`Lineup`]:
//! - the slots are exactly the layout generated for its formation code;
//! - a player occupies at most one slot;
//! - slot ordering indices are `1..=N` in sequence.
//!
//! Changing the formation regenerates the slots and clears every
//! assignment; there is no mapping from old roles to new ones.

use chrono::SubsecRound;
use serde::Serialize;

use crate::formation::FormationDescriptor;
use crate::layout::{generate_slots, SlotTemplate};
use crate::types::{DbId, LineupId, SlotId, Timestamp};

/// Maximum length of a lineup name.
pub const MAX_LINEUP_NAME_LEN: usize = 100;

/// Errors raised by the lineup aggregate and service.
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("Invalid formation format '{0}'. Use X-X-X, e.g. 4-4-2")]
    InvalidFormationFormat(String),

    #[error("Invalid lineup name: {0}")]
    InvalidName(String),

    #[error("Slot {0} does not belong to this lineup")]
    UnknownSlot(SlotId),

    #[error("Lineup {0} not found")]
    UnknownLineup(LineupId),

    #[error("Player {player_id} is already assigned to slot {slot_id}")]
    DuplicatePlayerAssignment { player_id: DbId, slot_id: SlotId },

    #[error("Lineup {0} was changed by someone else, please retry")]
    ConcurrentModification(LineupId),

    /// The referenced match or player does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Stored lineup is inconsistent: {0}")]
    CorruptLineup(String),

    #[error("Lineup storage failed: {0}")]
    Store(String),
}

/// One position on the pitch within a lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub id: SlotId,
    pub label: String,
    pub x: i16,
    pub y: i16,
    pub player_id: Option<DbId>,
    pub position_order: i16,
}

impl Slot {
    fn from_template(template: SlotTemplate) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            label: template.label,
            x: template.x,
            y: template.y,
            player_id: None,
            position_order: template.position_order,
        }
    }
}

/// Aggregate root. Fields are private so the invariants hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    id: LineupId,
    name: String,
    formation: String,
    match_id: Option<DbId>,
    created_at: Timestamp,
    version: i32,
    slots: Vec<Slot>,
}

fn validate_name(name: &str) -> Result<String, LineupError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LineupError::InvalidName(
            "name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_LINEUP_NAME_LEN {
        return Err(LineupError::InvalidName(format!(
            "name must be at most {MAX_LINEUP_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn materialize(formation: &FormationDescriptor) -> Vec<Slot> {
    generate_slots(&formation.code)
        .into_iter()
        .map(Slot::from_template)
        .collect()
}

impl Lineup {
    /// Build a new, fully unassigned lineup for `formation_code`.
    pub fn create_from_formation(
        name: &str,
        formation_code: &str,
        match_id: Option<DbId>,
    ) -> Result<Self, LineupError> {
        let name = validate_name(name)?;
        let formation = FormationDescriptor::parse(formation_code)?;
        Ok(Self {
            id: uuid::Uuid::now_v7(),
            name,
            slots: materialize(&formation),
            formation: formation.code,
            match_id,
            // Postgres keeps microseconds.
            created_at: chrono::Utc::now().trunc_subsecs(6),
            version: 1,
        })
    }

    /// Rehydrate a lineup read back from storage, re-checking the invariants.
    pub fn from_parts(
        id: LineupId,
        name: String,
        formation: String,
        match_id: Option<DbId>,
        created_at: Timestamp,
        version: i32,
        mut slots: Vec<Slot>,
    ) -> Result<Self, LineupError> {
        slots.sort_by_key(|s| s.position_order);

        let expected = FormationDescriptor::parse(&formation)
            .map(|f| generate_slots(&f.code).len())
            .map_err(|_| LineupError::CorruptLineup(format!("bad formation '{formation}'")))?;
        if slots.len() != expected {
            return Err(LineupError::CorruptLineup(format!(
                "lineup {id} has {} slots, formation {formation} needs {expected}",
                slots.len()
            )));
        }
        if slots.iter().zip(1i16..).any(|(s, n)| s.position_order != n) {
            return Err(LineupError::CorruptLineup(format!(
                "lineup {id} slot ordering is not contiguous"
            )));
        }

        let lineup = Self {
            id,
            name,
            formation,
            match_id,
            created_at,
            version,
            slots,
        };
        for slot in &lineup.slots {
            if let Some(player_id) = slot.player_id {
                if lineup.slot_of_player(player_id).map(|s| s.id) != Some(slot.id) {
                    return Err(LineupError::CorruptLineup(format!(
                        "player {player_id} appears in more than one slot of lineup {id}"
                    )));
                }
            }
        }
        Ok(lineup)
    }

    pub fn id(&self) -> LineupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formation(&self) -> &str {
        &self.formation
    }

    pub fn match_id(&self) -> Option<DbId> {
        self.match_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Version read from storage; saves are accepted only against this value.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Slots in ordering-index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    /// The slot currently holding `player_id`, if any.
    pub fn slot_of_player(&self, player_id: DbId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.player_id == Some(player_id))
    }

    /// Number of slots with a bound player.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player_id.is_some()).count()
    }

    pub fn rename(&mut self, name: &str) -> Result<(), LineupError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_match(&mut self, match_id: Option<DbId>) {
        self.match_id = match_id;
    }

    /// Replace the slot set with the layout of `new_code`. All slots start unassigned.
    pub fn change_formation(&mut self, new_code: &str) -> Result<(), LineupError> {
        let formation = FormationDescriptor::parse(new_code)?;
        self.slots = materialize(&formation);
        self.formation = formation.code;
        Ok(())
    }

    /// Bind `player_id` to `slot_id`, displacing any previous occupant.
    pub fn assign_player(&mut self, slot_id: SlotId, player_id: DbId) -> Result<(), LineupError> {
        let index = self.slot_index(slot_id)?;
        if let Some(holder) = self.slot_of_player(player_id) {
            if holder.id != slot_id {
                return Err(LineupError::DuplicatePlayerAssignment {
                    player_id,
                    slot_id: holder.id,
                });
            }
        }
        self.slots[index].player_id = Some(player_id);
        Ok(())
    }

    pub fn unassign_player(&mut self, slot_id: SlotId) -> Result<(), LineupError> {
        let index = self.slot_index(slot_id)?;
        self.slots[index].player_id = None;
        Ok(())
    }

    /// Called by the store after a successful versioned save.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    fn slot_index(&self, slot_id: SlotId) -> Result<usize, LineupError> {
        self.slots
            .iter()
            .position(|s| s.id == slot_id)
            .ok_or(LineupError::UnknownSlot(slot_id))
    }
}
