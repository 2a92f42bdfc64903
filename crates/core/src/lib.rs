//! # rendezvous-core
//!
//! Core domain models and business logic for the matchmaking and relay
//! core: sessions, queue entries, pairings, the client-facing event
//! protocol, and the ports the core depends on.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies — no sockets, no file I/O, no database.

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod pairing;
pub mod ports;
pub mod preferences;
pub mod queue_entry;
pub mod session;
pub mod tier;

pub use config::MatchmakingConfig;
pub use error::CoreError;
pub use events::{InboundEvent, OutboundEvent};
pub use ids::{SessionId, UserId};
pub use pairing::Pairing;
pub use preferences::{Gender, Preferences, Region};
pub use queue_entry::QueueEntry;
pub use session::Session;
pub use tier::Tier;
