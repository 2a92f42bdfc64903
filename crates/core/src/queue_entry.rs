use crate::ids::{SessionId, UserId};
use crate::preferences::Preferences;
use crate::tier::Tier;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// A `Session` currently waiting for a partner. Owned exclusively by the
/// matchmaking queue; a `SessionId` appears in the queue at most once, and
/// never simultaneously in the queue and in a pairing.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub tier: Tier,
    pub preferences: Preferences,
    pub blocked_user_ids: HashSet<UserId>,
    pub enqueued_at: DateTime<Utc>,
    pub search_attempts: u32,
}

impl QueueEntry {
    pub fn new(
        session_id: SessionId,
        user_id: UserId,
        tier: Tier,
        preferences: Preferences,
        blocked_user_ids: HashSet<UserId>,
        enqueued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            user_id,
            tier,
            preferences,
            blocked_user_ids,
            enqueued_at,
            search_attempts: 0,
        }
    }

    pub fn wait_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.enqueued_at).num_milliseconds().max(0)
    }

    pub fn blocks(&self, user: &UserId) -> bool {
        self.blocked_user_ids.contains(user)
    }
}
