use crate::deps::AppDeps;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::OutboundEvent;
use std::sync::Arc;
use tracing::instrument;

/// The Connection Registry's `Unregister` is the single authoritative
/// trigger for a disconnect: terminate the Search Driver, unpair if
/// paired, and remove from the queue if queued — all before the registry
/// forgets the session's delivery handle. Unlike `skip`, a disconnect does
/// *not* auto-requeue the partner (queue size is unchanged; the partner
/// only learns via `match-ended`).
pub struct Disconnect {
    deps: Arc<AppDeps>,
}

impl Disconnect {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self), fields(session_id = %session))]
    pub async fn execute(&self, session: &SessionId) {
        self.deps.drivers.stop(session);
        self.deps.queue.remove(session);
        self.deps.preferences_cache.forget(session);

        if let Some(partner_id) = self.deps.pairing.unpair(session) {
            self.deps.drivers.stop(&partner_id);
            let _ = self
                .deps
                .registry
                .send(
                    &partner_id,
                    OutboundEvent::MatchEnded {
                        reason: "disconnected".to_string(),
                        from_session_id: session.clone(),
                        disconnected: true,
                        auto_requeue: false,
                    },
                )
                .await;
        }

        self.deps.registry.unregister(session);
    }
}
