//! # rendezvous-infra
//!
//! Adapters for the matchmaking core: config loading (`config`) and the
//! default stand-ins for the three external collaborators the core only
//! ever consumes through a port trait (`adapters`) — `IdentityStorePort`,
//! `BlockStorePort`, `ModeratorPort`. A real deployment swaps these for
//! whatever actually backs auth, the social graph, and content moderation;
//! nothing in `rendezvous-core` or `rendezvous-app` needs to change when
//! it does.

pub mod adapters;
pub mod config;

pub use adapters::{InMemoryBlockStore, StaticIdentityStore, WordListModerator};
