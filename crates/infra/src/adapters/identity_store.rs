use async_trait::async_trait;
use rendezvous_core::ids::UserId;
use rendezvous_core::ports::{IdentityStoreError, IdentityStorePort};

/// A stand-in `IdentityStorePort` for deployments that have not wired up a
/// real auth backend yet. It trusts the bearer token as-is and treats it as
/// the user's stable identity — the same token always resolves to the same
/// `UserId`, which is all the core actually requires of this port. It does
/// not verify the token's authenticity; that is the real adapter's job.
///
/// The only validation performed here is rejecting the empty token, since an
/// empty `UserId` would silently collide across every unauthenticated
/// connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticIdentityStore;

impl StaticIdentityStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityStorePort for StaticIdentityStore {
    async fn authenticate(&self, token: &str) -> Result<UserId, IdentityStoreError> {
        if token.trim().is_empty() {
            return Err(IdentityStoreError::InvalidToken("empty token".to_string()));
        }
        Ok(UserId::from_string(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_token_resolves_to_the_same_user_id() {
        let store = StaticIdentityStore::new();
        let a = store.authenticate("token-1").await.unwrap();
        let b = store.authenticate("token-1").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn distinct_tokens_resolve_to_distinct_identities() {
        let store = StaticIdentityStore::new();
        let a = store.authenticate("token-1").await.unwrap();
        let b = store.authenticate("token-2").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let store = StaticIdentityStore::new();
        assert!(store.authenticate("").await.is_err());
        assert!(store.authenticate("   ").await.is_err());
    }
}
