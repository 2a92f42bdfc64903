mod interval;
mod registry;

pub use interval::adaptive_interval;
pub use registry::DriverRegistry;

use crate::pairing::{PairOutcome, PairingManager};
use crate::queue::MatchmakingQueue;
use chrono::Utc;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::OutboundEvent;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, instrument};

static NEXT_TOKEN_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Cooperative cancellation: a driver checks `is_cancelled` before every
/// `find_match` and before every `try_pair`, per the specification's
/// cancellation semantics. A driver that has already successfully paired
/// cannot be cancelled after the fact — the pairing stands.
///
/// Each token carries a unique `generation`, so `DriverRegistry` can tell
/// "the token I'm holding for this session" apart from "a newer token that
/// has since superseded it" — a driver that just finished must never
/// forget a fresh driver's entry for the same session.
#[derive(Clone)]
pub struct CancelToken {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            generation: NEXT_TOKEN_GENERATION.fetch_add(1, Ordering::Relaxed),
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session background task: polls the queue with adaptive backoff
/// until matched or cancelled. Runs until it either pairs, loses a race,
/// or is cancelled (disconnect, `cancel-match`, or a skip that forgoes
/// auto-requeue).
#[instrument(skip(queue, pairing, connections, cancel), fields(session_id = %session))]
pub async fn run(
    queue: Arc<MatchmakingQueue>,
    pairing: Arc<PairingManager>,
    connections: Arc<dyn ConnectionPort>,
    session: SessionId,
    cancel: CancelToken,
) {
    loop {
        if cancel.is_cancelled() {
            return;
        }
        if pairing.is_paired(&session) {
            // Paired by the other side's driver; match-found was already
            // emitted to both parties from over there.
            return;
        }

        let Some(caller) = queue.entry(&session) else {
            // Removed from the queue out from under us (disconnect, skip).
            return;
        };

        match queue.find_match(&session) {
            Some(candidate) => {
                if cancel.is_cancelled() {
                    return;
                }
                match pairing.try_pair(session.clone(), candidate.session_id.clone()) {
                    PairOutcome::Rejected => {
                        // Lost a race. If we are the one who got paired by
                        // someone else in the meantime, match-found was
                        // already emitted over there and we're done. If it
                        // was the candidate who got sniped, our own session
                        // is still queued and unpaired, so keep searching.
                        if pairing.is_paired(&session) {
                            return;
                        }
                        continue;
                    }
                    PairOutcome::Paired(_) => {
                        let self_wait_ms = caller.wait_ms(Utc::now());
                        let candidate_wait_ms = candidate.wait_ms(Utc::now());
                        queue.remove(&session);
                        queue.remove(&candidate.session_id);

                        let _ = connections
                            .send(
                                &session,
                                OutboundEvent::MatchFound {
                                    match_session_id: candidate.session_id.clone(),
                                    match_user_id: candidate.user_id.clone(),
                                    wait_time_ms: self_wait_ms,
                                },
                            )
                            .await;
                        let _ = connections
                            .send(
                                &candidate.session_id,
                                OutboundEvent::MatchFound {
                                    match_session_id: session.clone(),
                                    match_user_id: caller.user_id.clone(),
                                    wait_time_ms: candidate_wait_ms,
                                },
                            )
                            .await;
                        info!(partner = %candidate.session_id, "matched");
                        return;
                    }
                }
            }
            None => {
                let snapshot = queue.snapshot();
                let attempts = queue.search_attempts(&session).unwrap_or(0);
                let wait_ms = queue.wait_ms(&session).unwrap_or(0);

                let _ = connections
                    .send(
                        &session,
                        OutboundEvent::Searching {
                            queue_position: None,
                            wait_time_ms: wait_ms,
                        },
                    )
                    .await;

                let interval = adaptive_interval(snapshot.total, attempts);
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = cancel.cancelled() => { return; }
                    _ = queue.notify_on_enqueue.notified() => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendezvous_core::ports::ConnectionError;
    use rendezvous_core::{Preferences, Session, Tier};
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    struct RecordingConnections {
        events: StdMutex<Vec<(SessionId, OutboundEvent)>>,
    }

    #[async_trait::async_trait]
    impl ConnectionPort for RecordingConnections {
        async fn send(&self, session: &SessionId, event: OutboundEvent) -> Result<(), ConnectionError> {
            self.events.lock().unwrap().push((session.clone(), event));
            Ok(())
        }

        async fn is_connected(&self, _session: &SessionId) -> bool {
            true
        }
    }

    /// §4.D/§5/scenario 4: losing a `TryPair` race because the *candidate*
    /// was sniped by someone else must not terminate the driver — only
    /// losing because *we* were the one paired elsewhere should.
    #[tokio::test]
    async fn loser_of_a_sniped_candidate_keeps_searching_instead_of_terminating() {
        let queue = Arc::new(MatchmakingQueue::new(10_000, 5));
        let pairing = Arc::new(PairingManager::new());
        let connections = Arc::new(RecordingConnections {
            events: StdMutex::new(Vec::new()),
        });
        let conn_port: Arc<dyn ConnectionPort> = connections.clone();

        let s1 = Session::new("s1".into(), "u1".into(), Tier::Free);
        let s2 = Session::new("s2".into(), "u2".into(), Tier::Free);
        queue.enqueue(&s1, Preferences::default(), HashSet::new());
        queue.enqueue(&s2, Preferences::default(), HashSet::new());

        // A racing driver snipes s2 first; its cleanup removes s2 from the
        // queue, the same way the winning branch of `run` does.
        pairing.try_pair(s2.id.clone(), "external-winner".into());
        queue.remove(&s2.id);

        let token = CancelToken::new();
        let driver = tokio::spawn(run(queue.clone(), pairing.clone(), conn_port, s1.id.clone(), token));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(
            !pairing.is_paired(&s1.id),
            "s1 must not be paired yet, and must not have given up either"
        );

        let s3 = Session::new("s3".into(), "u3".into(), Tier::Free);
        queue.enqueue(&s3, Preferences::default(), HashSet::new());

        tokio::time::timeout(Duration::from_secs(2), driver)
            .await
            .expect("driver should still be alive and pair with the fresh candidate")
            .unwrap();

        assert_eq!(pairing.partner_of(&s1.id), Some(s3.id));
    }

    #[tokio::test]
    async fn cancel_wakes_a_waiting_driver_immediately() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });

        token.cancel();
        tokio::time::timeout(std::time::Duration::from_millis(200), handle)
            .await
            .expect("cancellation should be observed promptly")
            .unwrap();
    }

    #[test]
    fn cancel_token_starts_uncancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }
}
