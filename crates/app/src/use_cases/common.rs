use crate::deps::AppDeps;
use rendezvous_core::ports::BlockStoreError;
use rendezvous_core::{Preferences, Session};
use std::sync::Arc;
use tracing::warn;

/// Shared by `find-match` and the skip/auto-requeue protocol's re-enqueue
/// step: fetch the block list (falling back to an empty set on failure,
/// per the enqueue-time error policy), enqueue, remember the preferences
/// used, and start a fresh Search Driver.
pub async fn enqueue_and_search(deps: &Arc<AppDeps>, session: &Session, preferences: Preferences) {
    let blocked_user_ids = match deps.block_store.blocked_by(&session.user_id).await {
        Ok(blocked) => blocked,
        Err(BlockStoreError::Unavailable(reason)) => {
            warn!(
                session_id = %session.id,
                reason = %reason,
                "block store unavailable, enqueueing without block filter"
            );
            Default::default()
        }
    };

    deps.preferences_cache
        .remember(session.id.clone(), preferences.clone());
    deps.queue.enqueue(session, preferences, blocked_user_ids);
    deps.drivers.start(
        session.id.clone(),
        deps.queue.clone(),
        deps.pairing.clone(),
        deps.registry.clone(),
    );
}
