//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`PgLineupStore`] is the
//! exception: it owns a pool handle because it implements the core
//! [`touchline_core::lineup_service::LineupStore`] trait.

pub mod lineup_repo;
pub mod lineup_store;
pub mod match_repo;
pub mod player_repo;
pub mod presence_repo;
pub mod user_repo;

pub use lineup_repo::LineupRepo;
pub use lineup_store::PgLineupStore;
pub use match_repo::MatchRepo;
pub use player_repo::PlayerRepo;
pub use presence_repo::PresenceRepo;
pub use user_repo::UserRepo;
