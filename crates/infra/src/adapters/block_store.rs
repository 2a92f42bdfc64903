use async_trait::async_trait;
use rendezvous_core::ids::UserId;
use rendezvous_core::ports::{BlockStoreError, BlockStorePort};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// A stand-in `BlockStorePort` backed by an in-process map, for deployments
/// that have not wired up the real social-graph service yet. Blocks are not
/// persisted and do not survive a restart — a production adapter would read
/// from whatever owns the block-list table.
///
/// Block relations are stored one-directional per caller, matching the
/// port's contract (`blocked_by(user)` returns who `user` has blocked); the
/// core performs the mutual check itself by calling this twice, once per
/// direction (§4.B compatibility rule item 3).
#[derive(Debug, Default)]
pub struct InMemoryBlockStore {
    blocks: RwLock<HashMap<UserId, HashSet<UserId>>>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `blocker` has blocked `blocked`. Does not create the
    /// reverse relation — blocking is not inherently mutual.
    pub fn block(&self, blocker: UserId, blocked: UserId) {
        self.blocks
            .write()
            .expect("block store lock poisoned")
            .entry(blocker)
            .or_default()
            .insert(blocked);
    }

    pub fn unblock(&self, blocker: &UserId, blocked: &UserId) {
        if let Some(set) = self.blocks.write().expect("block store lock poisoned").get_mut(blocker) {
            set.remove(blocked);
        }
    }
}

#[async_trait]
impl BlockStorePort for InMemoryBlockStore {
    async fn blocked_by(&self, user: &UserId) -> Result<HashSet<UserId>, BlockStoreError> {
        Ok(self
            .blocks
            .read()
            .expect("block store lock poisoned")
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_has_an_empty_block_list() {
        let store = InMemoryBlockStore::new();
        let blocked = store.blocked_by(&"u1".into()).await.unwrap();
        assert!(blocked.is_empty());
    }

    #[tokio::test]
    async fn block_is_recorded_and_visible_to_blocked_by() {
        let store = InMemoryBlockStore::new();
        store.block("u1".into(), "u2".into());

        let blocked = store.blocked_by(&"u1".into()).await.unwrap();
        assert!(blocked.contains(&"u2".into()));
    }

    #[tokio::test]
    async fn blocking_is_not_automatically_mutual() {
        let store = InMemoryBlockStore::new();
        store.block("u1".into(), "u2".into());

        let reverse = store.blocked_by(&"u2".into()).await.unwrap();
        assert!(reverse.is_empty());
    }

    #[tokio::test]
    async fn unblock_removes_the_relation() {
        let store = InMemoryBlockStore::new();
        store.block("u1".into(), "u2".into());
        store.unblock(&"u1".into(), &"u2".into());

        let blocked = store.blocked_by(&"u1".into()).await.unwrap();
        assert!(!blocked.contains(&"u2".into()));
    }
}
