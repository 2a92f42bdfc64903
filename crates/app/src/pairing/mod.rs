use chrono::Utc;
use rendezvous_core::ids::SessionId;
use rendezvous_core::Pairing;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Outcome of an attempted pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Paired(Pairing),
    Rejected,
}

/// Owns the `{sessionA <-> sessionB}` relation. `TryPair`, `Unpair` and
/// `IsPaired` share one lock, which is the serialization point that makes
/// double-pairing and a skip racing a concurrent match impossible.
pub struct PairingManager {
    partners: Mutex<HashMap<SessionId, SessionId>>,
}

impl PairingManager {
    pub fn new() -> Self {
        Self {
            partners: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically checks that neither session is currently paired and
    /// creates the symmetric record; rejects otherwise. Exactly one of two
    /// racing `TryPair(A, B)` / `TryPair(A, C)` attempts succeeds.
    pub fn try_pair(&self, a: SessionId, b: SessionId) -> PairOutcome {
        let mut partners = self.partners.lock().expect("pairing mutex poisoned");
        if partners.contains_key(&a) || partners.contains_key(&b) {
            return PairOutcome::Rejected;
        }
        partners.insert(a.clone(), b.clone());
        partners.insert(b.clone(), a.clone());
        let pairing = Pairing::new(a, b, Utc::now());
        debug!(room_tag = %pairing.room_tag, "pairing created");
        PairOutcome::Paired(pairing)
    }

    pub fn partner_of(&self, session: &SessionId) -> Option<SessionId> {
        self.partners
            .lock()
            .expect("pairing mutex poisoned")
            .get(session)
            .cloned()
    }

    pub fn is_paired(&self, session: &SessionId) -> bool {
        self.partners.lock().expect("pairing mutex poisoned").contains_key(session)
    }

    /// Atomically removes both halves; returns the other half if there
    /// was one. A no-op (returns `None`) if `session` was already unpaired.
    pub fn unpair(&self, session: &SessionId) -> Option<SessionId> {
        let mut partners = self.partners.lock().expect("pairing mutex poisoned");
        let partner = partners.remove(session)?;
        partners.remove(&partner);
        debug!(session_id = %session, partner_id = %partner, "pairing torn down");
        Some(partner)
    }
}

impl Default for PairingManager {
    fn default() -> Self {
        Self::new()
    }
}
