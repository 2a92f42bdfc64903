use crate::deps::AppDeps;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::OutboundEvent;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Which of the three opaque WebRTC signaling messages is being relayed.
/// The payload is never inspected by the core — only the declared target
/// is checked against the live pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

impl SignalKind {
    fn into_outbound(self, from: SessionId, payload: Value) -> OutboundEvent {
        match self {
            SignalKind::Offer => OutboundEvent::Offer { from, payload },
            SignalKind::Answer => OutboundEvent::Answer { from, payload },
            SignalKind::IceCandidate => OutboundEvent::IceCandidate { from, payload },
        }
    }
}

/// Forwards `offer`/`answer`/`ice-candidate` strictly between paired peers.
/// Forwarded only if `PartnerOf(sender) == declaredTarget`; otherwise
/// dropped silently — a late signal after a skip is not an error.
pub struct SignalRelay {
    deps: Arc<AppDeps>,
}

impl SignalRelay {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self, payload), fields(session_id = %sender))]
    pub async fn execute(&self, sender: &SessionId, declared_target: &SessionId, kind: SignalKind, payload: Value) {
        if self.deps.pairing.partner_of(sender).as_ref() != Some(declared_target) {
            trace!(target = %declared_target, ?kind, "dropping signal: not the current partner");
            return;
        }
        let _ = self
            .deps
            .registry
            .send(declared_target, kind.into_outbound(sender.clone(), payload))
            .await;
    }
}
