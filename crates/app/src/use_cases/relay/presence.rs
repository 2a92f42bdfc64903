use crate::deps::AppDeps;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::OutboundEvent;
use std::sync::Arc;
use tracing::instrument;

/// Presence and media-toggle relay: `typing`/`stop-typing`/`video-toggle`/
/// `audio-toggle` forwarded verbatim to the partner, renamed to their
/// `peer-`/`user-` prefixed outbound counterparts. Dropped silently if the
/// sender currently has no partner — these are presence hints, never
/// queued or retried.
pub struct PresenceRelay {
    deps: Arc<AppDeps>,
}

impl PresenceRelay {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self), fields(session_id = %sender))]
    pub async fn relay_typing(&self, sender: &SessionId, is_typing: bool) {
        let Some(partner) = self.deps.pairing.partner_of(sender) else {
            return;
        };
        let event = if is_typing {
            OutboundEvent::UserTyping
        } else {
            OutboundEvent::UserStoppedTyping
        };
        let _ = self.deps.registry.send(&partner, event).await;
    }

    #[instrument(skip(self), fields(session_id = %sender))]
    pub async fn relay_video_toggle(&self, sender: &SessionId, enabled: bool) {
        let Some(partner) = self.deps.pairing.partner_of(sender) else {
            return;
        };
        let _ = self
            .deps
            .registry
            .send(&partner, OutboundEvent::PeerVideoToggle { enabled })
            .await;
    }

    #[instrument(skip(self), fields(session_id = %sender))]
    pub async fn relay_audio_toggle(&self, sender: &SessionId, enabled: bool) {
        let Some(partner) = self.deps.pairing.partner_of(sender) else {
            return;
        };
        let _ = self
            .deps
            .registry
            .send(&partner, OutboundEvent::PeerAudioToggle { enabled })
            .await;
    }
}
