use async_trait::async_trait;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::{ConnectionError, ConnectionPort};
use rendezvous_core::{OutboundEvent, Session};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Events delivered to a session arrive on this channel; the transport
/// gateway owns the receiving half and forwards frames to the socket.
pub type SessionSender = mpsc::Sender<OutboundEvent>;
pub type SessionReceiver = mpsc::Receiver<OutboundEvent>;

const SESSION_CHANNEL_CAPACITY: usize = 64;

struct Handle {
    sender: SessionSender,
    session: Session,
}

/// Tracks every live client session and delivers events to a specific one.
/// The single in-process implementation of `ConnectionPort`. Delivery is
/// ordered per session because it rides a bounded mpsc channel — the
/// channel itself serializes sends, no extra per-session lock is needed.
///
/// Beyond the `ConnectionPort` surface, the registry also remembers each
/// session's domain identity (`UserId`, `Tier`) for the connection's
/// lifetime, so use cases don't need a second lookup table to answer
/// "whose session is this".
pub struct ConnectionRegistry {
    handles: Mutex<HashMap<SessionId, Handle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a session and returns the receiving half the gateway
    /// forwards to the socket.
    pub fn register(&self, session: Session) -> SessionReceiver {
        let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        self.handles.lock().expect("registry mutex poisoned").insert(
            session.id.clone(),
            Handle {
                sender: tx,
                session,
            },
        );
        rx
    }

    /// Removes the session's delivery handle. Does not itself tear down a
    /// pairing or queue membership — callers (the gateway's disconnect
    /// path) are responsible for calling `Unpair`/`Remove` before this
    /// returns, per the single-authoritative-trigger requirement.
    pub fn unregister(&self, session: &SessionId) {
        self.handles.lock().expect("registry mutex poisoned").remove(session);
    }

    pub fn session_count(&self) -> usize {
        self.handles.lock().expect("registry mutex poisoned").len()
    }

    pub fn session_of(&self, session: &SessionId) -> Option<Session> {
        self.handles
            .lock()
            .expect("registry mutex poisoned")
            .get(session)
            .map(|h| h.session.clone())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionPort for ConnectionRegistry {
    async fn send(&self, session: &SessionId, event: OutboundEvent) -> Result<(), ConnectionError> {
        let sender = {
            let handles = self.handles.lock().expect("registry mutex poisoned");
            handles.get(session).map(|h| h.sender.clone())
        };
        match sender {
            Some(tx) => match tx.send(event).await {
                Ok(()) => {
                    debug!(session_id = %session, "event delivered");
                    Ok(())
                }
                Err(_) => {
                    warn!(session_id = %session, "delivery failed: receiver dropped");
                    Err(ConnectionError::NotDelivered(session.clone()))
                }
            },
            None => Err(ConnectionError::NotDelivered(session.clone())),
        }
    }

    async fn is_connected(&self, session: &SessionId) -> bool {
        self.handles.lock().expect("registry mutex poisoned").contains_key(session)
    }
}
