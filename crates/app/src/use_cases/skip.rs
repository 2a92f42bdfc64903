use crate::deps::AppDeps;
use crate::use_cases::common::enqueue_and_search;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::{OutboundEvent, Preferences, Session};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// `skip { autoRequeue }` inbound event — the five-step skip/auto-requeue
/// protocol. An `autoRequeue` session is re-enqueued after a short delay
/// (letting clients tear down WebRTC) by a detached task; its partner is
/// always auto-requeued too, "by convention", regardless of the skipper's
/// own flag.
///
/// Per the source's documented open question, a `skip` with no current
/// partner and `autoRequeue: false` behaves as a plain `cancel-match`.
pub struct Skip {
    deps: Arc<AppDeps>,
}

impl Skip {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self, session, preferences), fields(session_id = %session.id))]
    pub async fn execute(&self, session: &Session, auto_requeue: bool, preferences: Option<Preferences>) {
        match self.deps.pairing.unpair(&session.id) {
            Some(partner_id) => self.skip_paired(session, &partner_id, auto_requeue, preferences).await,
            None => self.skip_unpaired(session, auto_requeue, preferences).await,
        }
    }

    async fn skip_paired(
        &self,
        session: &Session,
        partner_id: &SessionId,
        auto_requeue: bool,
        preferences: Option<Preferences>,
    ) {
        info!(partner = %partner_id, "pairing skipped");

        // Defensive: drivers for both halves should already be stopped (a
        // paired session has no reason to still be searching). If one was
        // actually running, that is the bug case the spec calls out — tell
        // the affected client its matchmaking was torn down.
        if self.deps.drivers.stop(&session.id) {
            let _ = self
                .deps
                .registry
                .send(&session.id, OutboundEvent::MatchmakingStopped)
                .await;
        }
        if self.deps.drivers.stop(partner_id) {
            let _ = self
                .deps
                .registry
                .send(partner_id, OutboundEvent::MatchmakingStopped)
                .await;
        }

        let _ = self
            .deps
            .registry
            .send(
                partner_id,
                OutboundEvent::MatchEnded {
                    reason: "skipped".to_string(),
                    from_session_id: session.id.clone(),
                    disconnected: true,
                    auto_requeue: true,
                },
            )
            .await;
        let _ = self
            .deps
            .registry
            .send(
                &session.id,
                OutboundEvent::MatchEnded {
                    reason: "skipped".to_string(),
                    from_session_id: session.id.clone(),
                    disconnected: true,
                    auto_requeue,
                },
            )
            .await;
        let _ = self
            .deps
            .registry
            .send(&session.id, OutboundEvent::SkipSuccess { auto_requeue })
            .await;

        if auto_requeue {
            schedule_requeue(self.deps.clone(), session.id.clone(), preferences);
        }
        // The peer that was skipped on is auto-requeued regardless of S's flag.
        schedule_requeue(self.deps.clone(), partner_id.clone(), None);
    }

    async fn skip_unpaired(&self, session: &Session, auto_requeue: bool, preferences: Option<Preferences>) {
        // No current partner: tear down any in-flight search, per the
        // plain-cancel equivalence, then acknowledge. When `autoRequeue` is
        // requested anyway, treat it as "restart my search".
        self.deps.drivers.stop(&session.id);
        self.deps.queue.remove(&session.id);

        let _ = self
            .deps
            .registry
            .send(&session.id, OutboundEvent::SkipSuccess { auto_requeue })
            .await;

        if auto_requeue {
            schedule_requeue(self.deps.clone(), session.id.clone(), preferences);
        }
    }
}

/// Spawns the detached re-enqueue task. Verifies the session did not
/// somehow end up paired again in the interim (race repair) and that it is
/// still connected before touching the queue or the registry.
fn schedule_requeue(deps: Arc<AppDeps>, session_id: SessionId, preferences: Option<Preferences>) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(deps.config.requeue_delay_ms)).await;

        if deps.pairing.is_paired(&session_id) {
            warn!(session_id = %session_id, "requeue target unexpectedly still paired; repairing");
            deps.pairing.unpair(&session_id);
        }

        let Some(session) = deps.registry.session_of(&session_id) else {
            return;
        };

        let preferences = preferences
            .or_else(|| deps.preferences_cache.recall(&session_id))
            .unwrap_or_default();

        enqueue_and_search(&deps, &session, preferences).await;
    });
}
