pub mod attendance;
pub mod auth;
pub mod formations;
pub mod lineups;
pub mod matches;
pub mod players;
