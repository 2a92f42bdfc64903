use rendezvous_core::ids::SessionId;
use rendezvous_core::Preferences;
use std::collections::HashMap;
use std::sync::Mutex;

/// Remembers the last `Preferences` a session searched with, outliving that
/// session's `QueueEntry` (which is deleted on pairing). Needed so an
/// auto-requeued session — and its auto-requeued partner, who never sent a
/// `find-match` of its own for this round — can resume searching with the
/// preferences that found them their last match instead of the widest
/// possible default.
#[derive(Default)]
pub struct PreferencesCache {
    entries: Mutex<HashMap<SessionId, Preferences>>,
}

impl PreferencesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&self, session: SessionId, preferences: Preferences) {
        self.entries
            .lock()
            .expect("preferences cache mutex poisoned")
            .insert(session, preferences);
    }

    pub fn recall(&self, session: &SessionId) -> Option<Preferences> {
        self.entries
            .lock()
            .expect("preferences cache mutex poisoned")
            .get(session)
            .cloned()
    }

    pub fn forget(&self, session: &SessionId) {
        self.entries
            .lock()
            .expect("preferences cache mutex poisoned")
            .remove(session);
    }
}
