use crate::ids::SessionId;
use chrono::{DateTime, Utc};

/// A symmetric relation between two sessions. Both halves always refer to
/// the same pairing; it is created and destroyed atomically by the Pairing
/// Manager, never assembled piecemeal by any other component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub a: SessionId,
    pub b: SessionId,
    pub room_tag: String,
    pub created_at: DateTime<Utc>,
}

impl Pairing {
    pub fn new(a: SessionId, b: SessionId, created_at: DateTime<Utc>) -> Self {
        let room_tag = derive_room_tag(&a, &b);
        Self {
            a,
            b,
            room_tag,
            created_at,
        }
    }

    /// The other session in this pairing, if `session` is one of the two.
    pub fn partner_of(&self, session: &SessionId) -> Option<&SessionId> {
        if *session == self.a {
            Some(&self.b)
        } else if *session == self.b {
            Some(&self.a)
        } else {
            None
        }
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        *session == self.a || *session == self.b
    }
}

/// Room tags are order-independent: `Pairing::new(a, b)` and
/// `Pairing::new(b, a)` produce the same tag.
fn derive_room_tag(a: &SessionId, b: &SessionId) -> String {
    let (lo, hi) = if a.as_str() <= b.as_str() {
        (a.as_str(), b.as_str())
    } else {
        (b.as_str(), a.as_str())
    };
    format!("room-{lo}-{hi}")
}
