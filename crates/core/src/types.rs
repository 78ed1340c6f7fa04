/// Primary keys of players, staff and matches are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lineup identity, assigned by the aggregate when the lineup is created.
pub type LineupId = uuid::Uuid;

/// Slot identity, assigned when the slot is materialized and stable across
/// assignment edits.
pub type SlotId = uuid::Uuid;
