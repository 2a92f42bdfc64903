//! Hand-rolled test doubles shared across the use-case unit tests, in the
//! style of the core crate's inline `#[cfg(test)] mod tests` fakes —
//! plain structs implementing the port traits directly, no mock framework.
#![cfg(test)]

use crate::deps::AppDeps;
use async_trait::async_trait;
use rendezvous_core::ids::UserId;
use rendezvous_core::ports::{
    BlockStoreError, BlockStorePort, IdentityStoreError, IdentityStorePort, ModerationOutcome,
    ModeratorError, ModeratorPort,
};
use rendezvous_core::MatchmakingConfig;
use std::collections::HashSet;
use std::sync::Arc;

pub struct NoopBlockStore;

#[async_trait]
impl BlockStorePort for NoopBlockStore {
    async fn blocked_by(&self, _user: &UserId) -> Result<HashSet<UserId>, BlockStoreError> {
        Ok(HashSet::new())
    }
}

pub struct TestModerator {
    pub veto_contains: Option<&'static str>,
}

impl TestModerator {
    pub fn allow_all() -> Self {
        Self { veto_contains: None }
    }

    pub fn veto_containing(needle: &'static str) -> Self {
        Self {
            veto_contains: Some(needle),
        }
    }
}

#[async_trait]
impl ModeratorPort for TestModerator {
    async fn check(&self, text: &str) -> Result<ModerationOutcome, ModeratorError> {
        match self.veto_contains {
            Some(needle) if text.contains(needle) => Ok(ModerationOutcome::Veto {
                reason: "banned content".to_string(),
            }),
            _ => Ok(ModerationOutcome::Allow),
        }
    }
}

pub struct NoopIdentityStore;

#[async_trait]
impl IdentityStorePort for NoopIdentityStore {
    async fn authenticate(&self, token: &str) -> Result<UserId, IdentityStoreError> {
        Ok(UserId::from_string(token.to_string()))
    }
}

pub fn test_deps() -> AppDeps {
    AppDeps::new(
        Arc::new(NoopIdentityStore),
        Arc::new(NoopBlockStore),
        Arc::new(TestModerator::allow_all()),
        MatchmakingConfig::default(),
    )
}
