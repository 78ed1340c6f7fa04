//! Domain core for the Touchline roster backend.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! formation parsing, slot layout generation, the lineup aggregate and the
//! lineup service (generic over a [`lineup_service::LineupStore`]).

pub mod attendance;
pub mod error;
pub mod fixture;
pub mod formation;
pub mod layout;
pub mod lineup;
pub mod lineup_service;
pub mod people;
pub mod roles;
pub mod types;
