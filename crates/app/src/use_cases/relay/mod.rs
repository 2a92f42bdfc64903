mod chat;
mod presence;
mod signaling;

pub use chat::ChatRelay;
pub use presence::PresenceRelay;
pub use signaling::{SignalKind, SignalRelay};
