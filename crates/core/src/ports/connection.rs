use crate::events::OutboundEvent;
use crate::ids::SessionId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("session {0} has no live delivery handle")]
    NotDelivered(SessionId),
}

/// Abstracts "deliver an event to a specific session" so the Connection
/// Registry is the only in-process implementation the rest of the core
/// needs. Delivery is best-effort and at-most-once: a failed send is
/// never retried by the caller.
#[async_trait]
pub trait ConnectionPort: Send + Sync {
    async fn send(&self, session: &SessionId, event: OutboundEvent) -> Result<(), ConnectionError>;

    async fn is_connected(&self, session: &SessionId) -> bool;
}

#[cfg(test)]
mockall::mock! {
    pub Connection {}

    #[async_trait]
    impl ConnectionPort for Connection {
        async fn send(&self, session: &SessionId, event: OutboundEvent) -> Result<(), ConnectionError>;
        async fn is_connected(&self, session: &SessionId) -> bool;
    }
}
