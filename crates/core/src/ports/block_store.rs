use crate::ids::UserId;
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockStoreError {
    #[error("block store unavailable: {0}")]
    Unavailable(String),
}

/// Given a user, returns the set of users they have blocked. May fail —
/// callers treat failure as a best-effort empty set and log a warning,
/// per the enqueue-time fallback the specification requires.
#[async_trait]
pub trait BlockStorePort: Send + Sync {
    async fn blocked_by(&self, user: &UserId) -> Result<HashSet<UserId>, BlockStoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub BlockStore {}

    #[async_trait]
    impl BlockStorePort for BlockStore {
        async fn blocked_by(&self, user: &UserId) -> Result<HashSet<UserId>, BlockStoreError>;
    }
}
