use serde::{Deserialize, Serialize};

/// Tuning knobs for the matchmaking queue and search driver. Loaded from
/// TOML by the infra crate; this struct itself does no validation —
/// callers that need bounds checking do it at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// Cross-tier phase (Phase 2) is entered once a caller's wait exceeds
    /// this many milliseconds, even if Phase 1 yielded candidates.
    pub relaxed_phase_wait_threshold_ms: i64,
    /// Delay before an auto-requeued session re-enters the queue, giving
    /// clients time to tear down WebRTC state.
    pub requeue_delay_ms: u64,
    /// Size of the candidate shortlist considered for weighted-random
    /// selection.
    pub top_k: usize,
    /// Address the transport gateway binds to.
    pub bind_addr: String,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            relaxed_phase_wait_threshold_ms: 10_000,
            requeue_delay_ms: 200,
            top_k: 5,
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}
