use crate::deps::AppDeps;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::OutboundEvent;
use std::sync::Arc;
use tracing::instrument;

/// `cancel-match` inbound event: stop the session's Search Driver, remove
/// it from the queue, and acknowledge with `match-cancelled`. A no-op
/// (aside from the ack) if the session was not actually searching.
pub struct CancelMatch {
    deps: Arc<AppDeps>,
}

impl CancelMatch {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self), fields(session_id = %session))]
    pub async fn execute(&self, session: &SessionId) {
        self.deps.drivers.stop(session);
        self.deps.queue.remove(session);
        let _ = self.deps.registry.send(session, OutboundEvent::MatchCancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_deps;
    use rendezvous_core::{Preferences, Session, Tier};
    use std::collections::HashSet;

    #[tokio::test]
    async fn cancel_stops_the_driver_and_clears_the_queue_entry() {
        let deps = Arc::new(test_deps());
        let session = Session::new("s1".into(), "u1".into(), Tier::Free);
        let _rx = deps.registry.register(session.clone());
        deps.queue.enqueue(&session, Preferences::default(), HashSet::new());
        deps.drivers.start(
            session.id.clone(),
            deps.queue.clone(),
            deps.pairing.clone(),
            deps.registry.clone(),
        );

        CancelMatch::new(deps.clone()).execute(&session.id).await;

        assert!(!deps.queue.contains(&session.id));
        assert!(!deps.drivers.is_running(&session.id));
    }

    #[tokio::test]
    async fn cancel_acknowledges_with_match_cancelled() {
        let deps = Arc::new(test_deps());
        let session = Session::new("s1".into(), "u1".into(), Tier::Free);
        let mut rx = deps.registry.register(session.clone());

        CancelMatch::new(deps.clone()).execute(&session.id).await;

        assert!(matches!(rx.recv().await, Some(OutboundEvent::MatchCancelled)));
    }

    #[tokio::test]
    async fn cancel_of_a_session_that_was_never_searching_is_harmless() {
        let deps = Arc::new(test_deps());
        let session = Session::new("s1".into(), "u1".into(), Tier::Free);
        let _rx = deps.registry.register(session.clone());

        CancelMatch::new(deps.clone()).execute(&session.id).await;

        assert!(!deps.queue.contains(&session.id));
    }
}
