use crate::deps::AppDeps;
use chrono::Utc;
use rendezvous_core::ids::SessionId;
use rendezvous_core::ports::{ConnectionPort, ModerationOutcome, ModeratorError};
use rendezvous_core::OutboundEvent;
use std::sync::Arc;
use tracing::{instrument, warn};

/// `send-message { text }`: submitted to the `Moderator` before relay. A
/// veto reaches only the sender as `message-blocked`; an allow is echoed to
/// both sender and partner as `receive-message` so both sides agree on a
/// single authoritative timestamp and ordering. Dropped silently if the
/// sender currently has no partner.
///
/// Moderator unavailability is treated as fail-closed, unlike the
/// `BlockStore` fallback: a block-list outage only widens who you might be
/// matched with, but a moderator outage would otherwise let unmoderated
/// content straight through, so the message is blocked and the sender told
/// to retry rather than silently relayed.
pub struct ChatRelay {
    deps: Arc<AppDeps>,
}

impl ChatRelay {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self, text), fields(session_id = %sender))]
    pub async fn execute(&self, sender: &SessionId, text: String) {
        let Some(partner) = self.deps.pairing.partner_of(sender) else {
            return;
        };

        match self.deps.moderator.check(&text).await {
            Ok(ModerationOutcome::Veto { reason }) => {
                let _ = self
                    .deps
                    .registry
                    .send(sender, OutboundEvent::MessageBlocked { reason })
                    .await;
            }
            Ok(ModerationOutcome::Allow) => {
                let timestamp = Utc::now();
                let to_sender = OutboundEvent::ReceiveMessage {
                    message: text.clone(),
                    timestamp,
                    sender_id: sender.clone(),
                };
                let to_partner = OutboundEvent::ReceiveMessage {
                    message: text,
                    timestamp,
                    sender_id: sender.clone(),
                };
                let _ = self.deps.registry.send(sender, to_sender).await;
                let _ = self.deps.registry.send(&partner, to_partner).await;
            }
            Err(ModeratorError::Unavailable(reason)) => {
                warn!(reason = %reason, "moderator unavailable, blocking message");
                let _ = self
                    .deps
                    .registry
                    .send(
                        sender,
                        OutboundEvent::MessageBlocked {
                            reason: "moderation temporarily unavailable".to_string(),
                        },
                    )
                    .await;
            }
        }
    }
}
