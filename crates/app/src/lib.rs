//! # rendezvous-app
//!
//! The matchmaking queue, pairing manager, connection registry, search
//! driver, and the use cases that wire them together with the external
//! collaborator ports from `rendezvous-core`. This crate owns every piece
//! of process-wide mutable state (`AppDeps`); the transport gateway binary
//! constructs one `AppDeps` at startup and threads it through every
//! connection's handler.

pub mod deps;
pub mod pairing;
pub mod preferences_cache;
pub mod queue;
pub mod registry;
pub mod search_driver;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use deps::AppDeps;
pub use use_cases::Dispatcher;
