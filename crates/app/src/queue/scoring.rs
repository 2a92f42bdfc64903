use rand::Rng;
use rendezvous_core::QueueEntry;

/// `score = (tierMatch ? 100 : 50) + min(50, avgWaitMs / 600) -
/// min(20, candidate.searchAttempts * 2) + uniform(0, 10)`.
///
/// `avgWaitMs` is the average of the caller's and the candidate's current
/// wait time — both sides' patience feeds the fairness boost, not just
/// the caller's.
pub fn score(caller_wait_ms: i64, candidate: &QueueEntry, candidate_wait_ms: i64, tier_match: bool) -> f64 {
    let base = if tier_match { 100.0 } else { 50.0 };
    let avg_wait_ms = ((caller_wait_ms + candidate_wait_ms) as f64) / 2.0;
    let fairness = (avg_wait_ms / 600.0).min(50.0);
    let anti_starvation = ((candidate.search_attempts as f64) * 2.0).min(20.0);
    base + fairness - anti_starvation
}

/// One uniform draw over the score-weighted top-k, per the design note:
/// a deterministic sort-and-scan, the RNG called exactly once. `candidates`
/// is `(entry, score, tier_match)`; only the entry and score matter here.
pub fn select_weighted<R: Rng + ?Sized>(
    mut candidates: Vec<(QueueEntry, f64)>,
    top_k: usize,
    rng: &mut R,
) -> Option<QueueEntry> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(top_k);

    let jittered: Vec<(QueueEntry, f64)> = candidates
        .into_iter()
        .map(|(entry, s)| (entry, (s + rng.random_range(0.0..10.0)).max(0.0)))
        .collect();

    let total: f64 = jittered.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return jittered.into_iter().next().map(|(entry, _)| entry);
    }

    let mut draw = rng.random_range(0.0..total);
    for (entry, weight) in jittered {
        if draw < weight {
            return Some(entry);
        }
        draw -= weight;
    }
    None
}
