//! Orchestration of lineup edits over a persistence store.
//!
//! The service loads an aggregate, applies the change in memory and
//! writes it back with a version check. A stale version is reported as
//! [`LineupError::ConcurrentModification`], or as
//! [`LineupError::UnknownLineup`] when the lineup was deleted in the
//! meantime. Conflicts are never retried here.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use crate::formation::DEFAULT_FORMATION;
use crate::layout::{layout_for, SlotTemplate};
use crate::lineup::{Lineup, LineupError};
use crate::types::{DbId, LineupId, SlotId};

/// Failure reported by a [`LineupStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stored version no longer matches the aggregate's version.
    #[error("version conflict")]
    VersionConflict,

    /// A referenced match or player does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Stored rows violate a lineup invariant.
    #[error("corrupt lineup: {0}")]
    Corrupt(String),

    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for LineupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidReference(msg) => LineupError::InvalidReference(msg),
            StoreError::Corrupt(msg) => LineupError::CorruptLineup(msg),
            other => LineupError::Store(other.to_string()),
        }
    }
}

/// Persistence seam for lineups.
///
/// Every `save_*` method must succeed only if the stored version equals
/// `lineup.version()`, and must then increment the stored version.
pub trait LineupStore: Send + Sync {
    /// Persist a new lineup together with all its slots.
    fn insert(&self, lineup: &Lineup) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn load(
        &self,
        id: LineupId,
    ) -> impl Future<Output = Result<Option<Lineup>, StoreError>> + Send;

    fn exists(&self, id: LineupId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Write the player reference of every slot.
    fn save_assignments(
        &self,
        lineup: &Lineup,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Write the formation code and replace the whole slot set.
    fn save_formation(
        &self,
        lineup: &Lineup,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Write the name and match reference.
    fn save_details(&self, lineup: &Lineup)
        -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a lineup and its slots. Returns `false` if it did not exist.
    fn delete(&self, id: LineupId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// What the lineup bootstrap needs to know about a freshly created match.
#[derive(Debug, Clone)]
pub struct MatchRef {
    pub id: DbId,
    pub opponent: String,
}

/// Name given to the lineup created automatically for a match.
pub fn match_lineup_name(opponent: &str) -> String {
    format!("Équipe vs {opponent}")
}

/// Build the empty default-formation lineup for a new match, without persisting it.
pub fn lineup_for_match(match_ref: &MatchRef) -> Result<Lineup, LineupError> {
    Lineup::create_from_formation(
        &match_lineup_name(&match_ref.opponent),
        DEFAULT_FORMATION,
        Some(match_ref.id),
    )
}

pub struct LineupService<S> {
    store: S,
}

impl<S: LineupStore> LineupService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        name: &str,
        formation_code: &str,
        match_id: Option<DbId>,
    ) -> Result<Lineup, LineupError> {
        let lineup = Lineup::create_from_formation(name, formation_code, match_id)?;
        self.store.insert(&lineup).await?;
        tracing::info!(
            lineup_id = %lineup.id(),
            formation = lineup.formation(),
            match_id = ?match_id,
            "Lineup created"
        );
        Ok(lineup)
    }

    pub async fn get(&self, id: LineupId) -> Result<Lineup, LineupError> {
        self.store
            .load(id)
            .await?
            .ok_or(LineupError::UnknownLineup(id))
    }

    /// Apply a set of slot assignments atomically.
    ///
    /// The whole target state is validated before anything is changed:
    /// an unknown slot or a player ending up in two slots rejects the
    /// request and leaves the stored lineup untouched. Moving players
    /// between requested slots (including swaps) is allowed.
    pub async fn update_assignments(
        &self,
        id: LineupId,
        assignments: &BTreeMap<SlotId, Option<DbId>>,
    ) -> Result<Lineup, LineupError> {
        let mut lineup = self.get(id).await?;
        validate_target(&lineup, assignments)?;

        for slot_id in assignments.keys() {
            lineup.unassign_player(*slot_id)?;
        }
        for (slot_id, player_id) in assignments {
            if let Some(player_id) = player_id {
                lineup.assign_player(*slot_id, *player_id)?;
            }
        }

        if let Err(err) = self.store.save_assignments(&lineup).await {
            return Err(self.resolve_save_error(id, err).await);
        }
        lineup.bump_version();

        tracing::info!(
            lineup_id = %id,
            changed = assignments.len(),
            assigned = lineup.assigned_count(),
            "Lineup assignments updated"
        );
        Ok(lineup)
    }

    /// Switch the lineup to a new formation; every slot starts unassigned.
    pub async fn change_formation(
        &self,
        id: LineupId,
        new_code: &str,
    ) -> Result<Lineup, LineupError> {
        let mut lineup = self.get(id).await?;
        let previous = lineup.formation().to_string();
        lineup.change_formation(new_code)?;

        if let Err(err) = self.store.save_formation(&lineup).await {
            return Err(self.resolve_save_error(id, err).await);
        }
        lineup.bump_version();

        tracing::info!(lineup_id = %id, from = %previous, to = new_code, "Lineup formation changed");
        Ok(lineup)
    }

    /// Rename the lineup and/or move it to another match.
    ///
    /// `match_id` is doubly optional: `None` keeps the current link,
    /// `Some(None)` detaches the lineup from its match.
    pub async fn update_details(
        &self,
        id: LineupId,
        name: Option<&str>,
        match_id: Option<Option<DbId>>,
    ) -> Result<Lineup, LineupError> {
        let mut lineup = self.get(id).await?;
        if let Some(name) = name {
            lineup.rename(name)?;
        }
        if let Some(match_id) = match_id {
            lineup.set_match(match_id);
        }

        if let Err(err) = self.store.save_details(&lineup).await {
            return Err(self.resolve_save_error(id, err).await);
        }
        lineup.bump_version();

        tracing::info!(lineup_id = %id, "Lineup details updated");
        Ok(lineup)
    }

    /// Preview the layout `new_code` would give this lineup, without saving.
    pub async fn regenerate_formation(
        &self,
        id: LineupId,
        new_code: &str,
    ) -> Result<Vec<SlotTemplate>, LineupError> {
        if !self.store.exists(id).await? {
            return Err(LineupError::UnknownLineup(id));
        }
        layout_for(new_code)
    }

    pub async fn delete(&self, id: LineupId) -> Result<(), LineupError> {
        if !self.store.delete(id).await? {
            return Err(LineupError::UnknownLineup(id));
        }
        tracing::info!(lineup_id = %id, "Lineup deleted");
        Ok(())
    }

    async fn resolve_save_error(&self, id: LineupId, err: StoreError) -> LineupError {
        match err {
            StoreError::VersionConflict => match self.store.exists(id).await {
                Ok(true) => {
                    tracing::warn!(lineup_id = %id, "Concurrent lineup modification detected");
                    LineupError::ConcurrentModification(id)
                }
                Ok(false) => LineupError::UnknownLineup(id),
                Err(e) => e.into(),
            },
            other => other.into(),
        }
    }
}

/// Check the state `assignments` would produce, without touching `lineup`.
fn validate_target(
    lineup: &Lineup,
    assignments: &BTreeMap<SlotId, Option<DbId>>,
) -> Result<(), LineupError> {
    if let Some(unknown) = assignments.keys().find(|id| lineup.slot(**id).is_none()) {
        return Err(LineupError::UnknownSlot(*unknown));
    }

    let mut holders: HashMap<DbId, SlotId> = HashMap::new();
    for slot in lineup.slots() {
        let player = assignments.get(&slot.id).copied().unwrap_or(slot.player_id);
        let Some(player_id) = player else {
            continue;
        };
        if let Some(first) = holders.insert(player_id, slot.id) {
            // Name the slot the caller is colliding with.
            let conflicting = if assignments.contains_key(&slot.id) {
                first
            } else {
                slot.id
            };
            return Err(LineupError::DuplicatePlayerAssignment {
                player_id,
                slot_id: conflicting,
            });
        }
    }
    Ok(())
}
