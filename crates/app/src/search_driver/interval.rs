use std::time::Duration;

/// Computed at each tick from the queue snapshot. The table governs the
/// *maximum* sleep; a fresh `Enqueue` notification can cut it short (see
/// `MatchmakingQueue::notify_on_enqueue`).
pub fn adaptive_interval(queue_size: usize, attempts: u32) -> Duration {
    if queue_size == 1 {
        let exponent = attempts / 5;
        let backoff_secs = 2u64.saturating_pow(exponent);
        return Duration::from_secs(backoff_secs.min(10));
    }
    if queue_size <= 2 {
        return Duration::from_millis(500);
    }
    if attempts < 5 {
        return Duration::from_secs(1);
    }
    if attempts < 15 {
        return Duration::from_secs(2);
    }
    Duration::from_secs(3)
}
