//! PostgreSQL implementation of [`LineupStore`].
//!
//! Every write that touches an existing lineup starts with
//! `UPDATE lineups ... WHERE id = $1 AND version = $2`; zero affected
//! rows means someone else saved first (or deleted the lineup) and the
//! transaction is rolled back with [`StoreError::VersionConflict`].

use sqlx::PgPool;
use touchline_core::lineup::{Lineup, Slot};
use touchline_core::lineup_service::{LineupStore, StoreError};
use touchline_core::types::LineupId;

use crate::begin_snapshot;
use crate::models::lineup::{LineupRow, SlotRow};

type PgTransaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// Foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Lineup store backed by the `lineups` and `lineup_slots` tables.
#[derive(Clone)]
pub struct PgLineupStore {
    pool: PgPool,
}

impl PgLineupStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a lineup and its slots inside a caller-owned transaction.
    pub async fn insert_in_tx(
        tx: &mut PgTransaction<'_>,
        lineup: &Lineup,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO lineups (id, name, formation, match_id, version, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(lineup.id())
        .bind(lineup.name())
        .bind(lineup.formation())
        .bind(lineup.match_id())
        .bind(lineup.version())
        .bind(lineup.created_at())
        .execute(&mut **tx)
        .await?;

        insert_slots(tx, lineup.id(), lineup.slots()).await
    }

    async fn load_inner(&self, id: LineupId) -> Result<Option<Lineup>, sqlx::Error> {
        let mut tx = begin_snapshot(&self.pool).await?;
        let row = sqlx::query_as::<_, LineupRow>(
            "SELECT id, name, formation, match_id, version, created_at, updated_at
             FROM lineups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let slots = sqlx::query_as::<_, SlotRow>(
            "SELECT id, lineup_id, label, x, y, position_order, player_id
             FROM lineup_slots WHERE lineup_id = $1
             ORDER BY position_order",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Lineup::from_parts(
            row.id,
            row.name,
            row.formation,
            row.match_id,
            row.created_at,
            row.version,
            slots.into_iter().map(Slot::from).collect(),
        )
        .map(Some)
        .map_err(|e| sqlx::Error::Decode(e.to_string().into()))
    }
}

async fn insert_slots(
    tx: &mut PgTransaction<'_>,
    lineup_id: LineupId,
    slots: &[Slot],
) -> Result<(), sqlx::Error> {
    for slot in slots {
        sqlx::query(
            "INSERT INTO lineup_slots (id, lineup_id, label, x, y, position_order, player_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(slot.id)
        .bind(lineup_id)
        .bind(&slot.label)
        .bind(slot.x)
        .bind(slot.y)
        .bind(slot.position_order)
        .bind(slot.player_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Claim the next version of `lineup` and write its own columns.
///
/// Returns `false` if the stored version no longer matches.
async fn claim_version(tx: &mut PgTransaction<'_>, lineup: &Lineup) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE lineups SET
            name = $3,
            formation = $4,
            match_id = $5,
            version = version + 1
         WHERE id = $1 AND version = $2",
    )
    .bind(lineup.id())
    .bind(lineup.version())
    .bind(lineup.name())
    .bind(lineup.formation())
    .bind(lineup.match_id())
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() == 1)
}

fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            StoreError::InvalidReference(db.message().to_string())
        }
        sqlx::Error::Decode(source) => StoreError::Corrupt(source.to_string()),
        _ => {
            tracing::error!(error = %err, "Lineup store query failed");
            StoreError::Backend(err.to_string())
        }
    }
}

/// Point every slot of `lineup` at its current player.
async fn write_assignments(
    tx: &mut PgTransaction<'_>,
    lineup: &Lineup,
) -> Result<(), sqlx::Error> {
    for slot in lineup.slots() {
        sqlx::query("UPDATE lineup_slots SET player_id = $3 WHERE id = $1 AND lineup_id = $2")
            .bind(slot.id)
            .bind(lineup.id())
            .bind(slot.player_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Drop the stored slot set and insert the aggregate's one.
async fn replace_slots(tx: &mut PgTransaction<'_>, lineup: &Lineup) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM lineup_slots WHERE lineup_id = $1")
        .bind(lineup.id())
        .execute(&mut **tx)
        .await?;
    insert_slots(tx, lineup.id(), lineup.slots()).await
}

/// What a versioned save rewrites besides the `lineups` row.
#[derive(Debug, Clone, Copy)]
enum SlotWrite {
    None,
    Assignments,
    Replace,
}

impl PgLineupStore {
    async fn versioned_save(&self, lineup: &Lineup, slots: SlotWrite) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;
        if !claim_version(&mut tx, lineup).await.map_err(store_error)? {
            tracing::debug!(
                lineup_id = %lineup.id(),
                version = lineup.version(),
                "Stale lineup version"
            );
            return Err(StoreError::VersionConflict);
        }
        match slots {
            SlotWrite::None => Ok(()),
            SlotWrite::Assignments => write_assignments(&mut tx, lineup).await,
            SlotWrite::Replace => replace_slots(&mut tx, lineup).await,
        }
        .map_err(store_error)?;
        tx.commit().await.map_err(store_error)
    }
}

impl LineupStore for PgLineupStore {
    async fn insert(&self, lineup: &Lineup) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;
        Self::insert_in_tx(&mut tx, lineup).await.map_err(store_error)?;
        tx.commit().await.map_err(store_error)
    }

    async fn load(&self, id: LineupId) -> Result<Option<Lineup>, StoreError> {
        self.load_inner(id).await.map_err(store_error)
    }

    async fn exists(&self, id: LineupId) -> Result<bool, StoreError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM lineups WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(row.0)
    }

    async fn save_assignments(&self, lineup: &Lineup) -> Result<(), StoreError> {
        self.versioned_save(lineup, SlotWrite::Assignments).await
    }

    async fn save_formation(&self, lineup: &Lineup) -> Result<(), StoreError> {
        self.versioned_save(lineup, SlotWrite::Replace).await
    }

    async fn save_details(&self, lineup: &Lineup) -> Result<(), StoreError> {
        self.versioned_save(lineup, SlotWrite::None).await
    }

    async fn delete(&self, id: LineupId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM lineups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}
