use crate::ids::UserId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityStoreError {
    #[error("token rejected: {0}")]
    InvalidToken(String),
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Authentication and user persistence are explicitly out of core scope;
/// this is the thin facade the core consumes instead.
#[async_trait]
pub trait IdentityStorePort: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<UserId, IdentityStoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub IdentityStore {}

    #[async_trait]
    impl IdentityStorePort for IdentityStore {
        async fn authenticate(&self, token: &str) -> Result<UserId, IdentityStoreError>;
    }
}
