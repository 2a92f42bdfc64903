mod scoring;

use chrono::Utc;
use rendezvous_core::ids::{SessionId, UserId};
use rendezvous_core::preferences::{Gender, Region};
use rendezvous_core::{Preferences, QueueEntry, Session, Tier};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::Notify;
use tracing::debug;

/// Read-only counts for observability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub total: usize,
    pub per_tier: HashMap<Tier, usize>,
}

struct QueueState {
    entries: HashMap<SessionId, QueueEntry>,
    tier_buckets: HashMap<Tier, HashSet<SessionId>>,
}

impl QueueState {
    fn new() -> Self {
        let mut tier_buckets = HashMap::new();
        for tier in Tier::ALL {
            tier_buckets.insert(tier, HashSet::new());
        }
        Self {
            entries: HashMap::new(),
            tier_buckets,
        }
    }

    fn insert(&mut self, entry: QueueEntry) {
        self.remove(&entry.session_id);
        self.tier_buckets
            .entry(entry.tier)
            .or_default()
            .insert(entry.session_id.clone());
        self.entries.insert(entry.session_id.clone(), entry);
    }

    fn remove(&mut self, session: &SessionId) -> Option<QueueEntry> {
        let removed = self.entries.remove(session);
        if let Some(entry) = &removed {
            if let Some(bucket) = self.tier_buckets.get_mut(&entry.tier) {
                bucket.remove(session);
            }
        }
        removed
    }
}

/// Holds waiting sessions, finds compatible partners, scores candidates,
/// selects a match. Tier buckets and entries live behind the same lock so
/// "tier buckets are always the disjoint union of queued sessions" holds
/// by construction.
pub struct MatchmakingQueue {
    state: Mutex<QueueState>,
    /// Fired after every successful `enqueue`, so a lone searcher's
    /// exponential backoff can be cut short by a fresh arrival.
    pub notify_on_enqueue: Notify,
    relaxed_phase_wait_threshold_ms: i64,
    top_k: usize,
}

impl MatchmakingQueue {
    pub fn new(relaxed_phase_wait_threshold_ms: i64, top_k: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::new()),
            notify_on_enqueue: Notify::new(),
            relaxed_phase_wait_threshold_ms,
            top_k,
        }
    }

    /// Idempotent re-insertion: any prior entry for this session is
    /// removed first. Precondition (enforced by the caller, not here): the
    /// session is not currently in a pairing.
    pub fn enqueue(&self, session: &Session, preferences: Preferences, blocked_user_ids: HashSet<UserId>) {
        let entry = QueueEntry::new(
            session.id.clone(),
            session.user_id.clone(),
            session.tier,
            preferences,
            blocked_user_ids,
            Utc::now(),
        );
        {
            let mut state = self.state.lock().expect("queue mutex poisoned");
            state.insert(entry);
        }
        debug!(session_id = %session.id, "enqueued");
        self.notify_on_enqueue.notify_waiters();
    }

    /// Removes from the queue; no-op if the session was not queued.
    pub fn remove(&self, session: &SessionId) {
        self.state.lock().expect("queue mutex poisoned").remove(session);
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.state.lock().expect("queue mutex poisoned").entries.contains_key(session)
    }

    /// A snapshot of the caller's own queue entry, if still queued.
    pub fn entry(&self, session: &SessionId) -> Option<QueueEntry> {
        self.state.lock().expect("queue mutex poisoned").entries.get(session).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("queue mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn wait_ms(&self, session: &SessionId) -> Option<i64> {
        let state = self.state.lock().expect("queue mutex poisoned");
        state.entries.get(session).map(|e| e.wait_ms(Utc::now()))
    }

    pub fn search_attempts(&self, session: &SessionId) -> Option<u32> {
        let state = self.state.lock().expect("queue mutex poisoned");
        state.entries.get(session).map(|e| e.search_attempts)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        let state = self.state.lock().expect("queue mutex poisoned");
        let mut per_tier = HashMap::new();
        for (tier, bucket) in &state.tier_buckets {
            per_tier.insert(*tier, bucket.len());
        }
        QueueSnapshot {
            total: state.entries.len(),
            per_tier,
        }
    }

    /// Finds a compatible partner for `session`, scoring and weighted-
    /// randomly selecting among the top candidates. Never modifies queue
    /// membership — promotion to a pairing is a separate step performed by
    /// the Pairing Manager. Increments the caller's `searchAttempts`.
    pub fn find_match(&self, session: &SessionId) -> Option<QueueEntry> {
        let now = Utc::now();
        let mut state = self.state.lock().expect("queue mutex poisoned");

        let caller = state.entries.get(session)?.clone();
        if let Some(caller_mut) = state.entries.get_mut(session) {
            caller_mut.search_attempts += 1;
        }
        let caller_wait_ms = caller.wait_ms(now);

        let mut candidates = Self::phase_same_tier(&state, &caller, now);
        if candidates.is_empty() || caller_wait_ms > self.relaxed_phase_wait_threshold_ms {
            candidates.extend(Self::phase_cross_tier(&state, &caller, now));
        }
        if candidates.is_empty() {
            candidates = Self::phase_relaxed(&state, &caller, now);
        }
        if candidates.is_empty() {
            return None;
        }

        let mut rng = rand::rng();
        scoring::select_weighted(candidates, self.top_k, &mut rng)
    }

    fn compatible_ignoring_prefs(caller: &QueueEntry, candidate: &QueueEntry) -> bool {
        candidate.session_id != caller.session_id
            && !caller.blocks(&candidate.user_id)
            && !candidate.blocks(&caller.user_id)
    }

    fn matches_preferences(caller: &QueueEntry, candidate: &QueueEntry) -> bool {
        if caller.preferences.region != Region::Any && caller.preferences.region != candidate.preferences.region {
            return false;
        }
        if caller.preferences.gender != Gender::Any && caller.preferences.gender != candidate.preferences.gender {
            return false;
        }
        true
    }

    fn phase_same_tier(
        state: &QueueState,
        caller: &QueueEntry,
        now: chrono::DateTime<Utc>,
    ) -> Vec<(QueueEntry, f64)> {
        let bucket = match state.tier_buckets.get(&caller.tier) {
            Some(b) => b,
            None => return Vec::new(),
        };
        bucket
            .iter()
            .filter_map(|id| state.entries.get(id))
            .filter(|c| Self::compatible_ignoring_prefs(caller, c) && Self::matches_preferences(caller, c))
            .map(|c| {
                let s = scoring::score(caller.wait_ms(now), c, c.wait_ms(now), true);
                (c.clone(), s)
            })
            .collect()
    }

    fn phase_cross_tier(
        state: &QueueState,
        caller: &QueueEntry,
        now: chrono::DateTime<Utc>,
    ) -> Vec<(QueueEntry, f64)> {
        state
            .tier_buckets
            .iter()
            .filter(|(tier, _)| **tier != caller.tier)
            .flat_map(|(_, bucket)| bucket.iter())
            .filter_map(|id| state.entries.get(id))
            .filter(|c| Self::compatible_ignoring_prefs(caller, c) && Self::matches_preferences(caller, c))
            .map(|c| {
                let s = scoring::score(caller.wait_ms(now), c, c.wait_ms(now), false);
                (c.clone(), s)
            })
            .collect()
    }

    /// Ignores region/gender; keeps only the mutual-block check. Scored
    /// the same way same-tier/cross-tier candidates are.
    fn phase_relaxed(
        state: &QueueState,
        caller: &QueueEntry,
        now: chrono::DateTime<Utc>,
    ) -> Vec<(QueueEntry, f64)> {
        state
            .entries
            .values()
            .filter(|c| Self::compatible_ignoring_prefs(caller, c))
            .map(|c| {
                let tier_match = c.tier == caller.tier;
                let s = scoring::score(caller.wait_ms(now), c, c.wait_ms(now), tier_match);
                (c.clone(), s)
            })
            .collect()
    }
}
