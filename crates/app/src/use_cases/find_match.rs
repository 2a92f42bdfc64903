use crate::deps::AppDeps;
use crate::use_cases::common::enqueue_and_search;
use rendezvous_core::{Preferences, Session};
use tracing::instrument;

/// `find-match` inbound event: enqueue the session and start its Search
/// Driver. If the session is already paired (a client resending
/// `find-match` mid-pairing, or state left over from a bug), the stale
/// pairing is torn down first — the queue's enqueue precondition is
/// enforced here, not inside the queue itself.
///
/// The wire payload also carries a `userId`, but the session's `user_id`
/// (established by `IdentityStorePort::authenticate` at connect time) is
/// the authoritative identity — the payload field is never consulted.
pub struct FindMatch {
    deps: std::sync::Arc<AppDeps>,
}

impl FindMatch {
    pub fn new(deps: std::sync::Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self, session, preferences), fields(session_id = %session.id))]
    pub async fn execute(&self, session: &Session, preferences: Preferences) {
        if self.deps.pairing.is_paired(&session.id) {
            self.deps.pairing.unpair(&session.id);
        }

        enqueue_and_search(&self.deps, session, preferences).await;
    }
}
