use super::{run, CancelToken};
use crate::pairing::PairingManager;
use crate::queue::MatchmakingQueue;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Tracks the cancel handle for every currently-running Search Driver task,
/// so `cancel-match`, `skip`, and disconnect handling can stop a specific
/// session's driver. A driver removes its own entry when it terminates.
#[derive(Default)]
pub struct DriverRegistry {
    tokens: Mutex<HashMap<SessionId, CancelToken>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new Search Driver for `session`. If one is already running
    /// for this session, it is cancelled first — starting a new search
    /// always supersedes an in-flight one.
    pub fn start(
        self: &Arc<Self>,
        session: SessionId,
        queue: Arc<MatchmakingQueue>,
        pairing: Arc<PairingManager>,
        connections: Arc<dyn ConnectionPort>,
    ) {
        self.stop(&session);

        let token = CancelToken::new();
        self.tokens
            .lock()
            .expect("driver registry mutex poisoned")
            .insert(session.clone(), token.clone());

        let registry = Arc::clone(self);
        let task_session = session.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            run(queue, pairing, connections, task_session.clone(), token).await;
            registry.forget(&task_session, &task_token);
        });
    }

    /// Cooperatively cancels the session's driver, if one is running.
    /// Returns whether a running driver was actually found and cancelled —
    /// callers that stop a driver "defensively" (expecting it to already be
    /// gone) use this to detect the unexpected case.
    pub fn stop(&self, session: &SessionId) -> bool {
        match self.tokens.lock().expect("driver registry mutex poisoned").remove(session) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, session: &SessionId) -> bool {
        self.tokens.lock().expect("driver registry mutex poisoned").contains_key(session)
    }

    /// Removes the session's entry only if it still holds `token` — a
    /// terminating driver that was superseded by `start()` while it was
    /// still shutting down must not clobber the newer driver's entry.
    fn forget(&self, session: &SessionId, token: &CancelToken) {
        let mut tokens = self.tokens.lock().expect("driver registry mutex poisoned");
        if tokens.get(session).map(|current| current.generation()) == Some(token.generation()) {
            tokens.remove(session);
        }
    }
}
