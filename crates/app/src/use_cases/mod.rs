mod cancel_match;
mod common;
mod disconnect;
mod find_match;
mod relay;
mod skip;

pub use cancel_match::CancelMatch;
pub use disconnect::Disconnect;
pub use find_match::FindMatch;
pub use relay::{ChatRelay, PresenceRelay, SignalKind, SignalRelay};
pub use skip::Skip;

use crate::deps::AppDeps;
use rendezvous_core::ids::SessionId;
use rendezvous_core::{InboundEvent, Session};
use std::sync::Arc;

/// The core's single per-session inbound-event handling function (§5:
/// "exactly one task per live session receives that session's inbound
/// events and preserves their order"). The transport gateway owns that
/// one task per session and feeds every frame it decodes through here, in
/// arrival order; `Dispatcher` itself holds no per-session state — it is
/// just a router to the use cases, all of which are cheap to construct.
pub struct Dispatcher {
    deps: Arc<AppDeps>,
}

impl Dispatcher {
    pub fn new(deps: Arc<AppDeps>) -> Self {
        Self { deps }
    }

    pub async fn dispatch(&self, session: &Session, event: InboundEvent) {
        match event {
            InboundEvent::FindMatch { preferences, .. } => {
                FindMatch::new(self.deps.clone()).execute(session, preferences).await
            }
            InboundEvent::CancelMatch => CancelMatch::new(self.deps.clone()).execute(&session.id).await,
            InboundEvent::Skip {
                preferences,
                auto_requeue,
                ..
            } => {
                Skip::new(self.deps.clone())
                    .execute(session, auto_requeue, preferences)
                    .await
            }
            InboundEvent::SendMessage { message } => {
                ChatRelay::new(self.deps.clone()).execute(&session.id, message).await
            }
            InboundEvent::Typing => PresenceRelay::new(self.deps.clone()).relay_typing(&session.id, true).await,
            InboundEvent::StopTyping => {
                PresenceRelay::new(self.deps.clone())
                    .relay_typing(&session.id, false)
                    .await
            }
            InboundEvent::Offer { to, payload } => {
                SignalRelay::new(self.deps.clone())
                    .execute(&session.id, &to, SignalKind::Offer, payload)
                    .await
            }
            InboundEvent::Answer { to, payload } => {
                SignalRelay::new(self.deps.clone())
                    .execute(&session.id, &to, SignalKind::Answer, payload)
                    .await
            }
            InboundEvent::IceCandidate { to, payload } => {
                SignalRelay::new(self.deps.clone())
                    .execute(&session.id, &to, SignalKind::IceCandidate, payload)
                    .await
            }
            InboundEvent::VideoToggle { enabled } => {
                PresenceRelay::new(self.deps.clone())
                    .relay_video_toggle(&session.id, enabled)
                    .await
            }
            InboundEvent::AudioToggle { enabled } => {
                PresenceRelay::new(self.deps.clone())
                    .relay_audio_toggle(&session.id, enabled)
                    .await
            }
        }
    }

    /// The Connection Registry's single authoritative disconnect trigger.
    pub async fn disconnect(&self, session: &SessionId) {
        Disconnect::new(self.deps.clone()).execute(session).await
    }
}
