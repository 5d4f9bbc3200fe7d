//! Shared crawl frontier
//!
//! The frontier is the only mutable state shared between crawl workers: a
//! pending set of URLs queued for fetching and a monotonically growing
//! visited set. All mutations happen inside one mutex-guarded critical
//! section per call, so "read pending/visited, decide, mutate" can never
//! interleave between workers. The raw sets are never exposed.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use url::Url;

/// Outcome of returning a failed URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requeue {
    /// The URL was re-queued; this is attempt number `attempt`
    Retry { attempt: u32 },

    /// The retry cap was reached; the URL is a permanent failure
    GaveUp,
}

#[derive(Debug, Default)]
struct FrontierState {
    pending: HashSet<Url>,
    visited: HashSet<Url>,
    attempts: HashMap<Url, u32>,
    in_flight: usize,
}

/// Pending/visited URL state driving the crawl
///
/// A URL is fetched at most once per run: `claim_next` moves it from
/// pending to visited atomically, and link discovery can never re-enqueue a
/// visited URL. Only the explicit failure-retry path (`requeue`) puts a
/// visited URL back into pending, bounded by the retry cap.
pub struct Frontier {
    state: Mutex<FrontierState>,
    max_attempts: u32,
}

impl Frontier {
    /// Creates an empty frontier with the given per-URL attempt cap
    ///
    /// `max_attempts` counts fetch attempts, so a cap of 3 means one
    /// initial attempt plus two retries.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Enqueues a URL unless it was already seen
    ///
    /// Returns true if the URL entered the pending set. URLs already
    /// pending or already visited are dropped by set semantics.
    pub fn enqueue(&self, url: Url) -> bool {
        let mut state = self.lock();
        if state.visited.contains(&url) || state.pending.contains(&url) {
            return false;
        }
        state.pending.insert(url)
    }

    /// Claims an arbitrary pending URL for fetching
    ///
    /// The URL is marked visited and counted in-flight in the same critical
    /// section, so no two workers can claim the same URL. No selection
    /// order is guaranteed.
    pub fn claim_next(&self) -> Option<Url> {
        let mut state = self.lock();
        let url = state.pending.iter().next().cloned()?;
        state.pending.remove(&url);
        state.visited.insert(url.clone());
        state.in_flight += 1;
        *state.attempts.entry(url.clone()).or_insert(0) += 1;
        Some(url)
    }

    /// Marks a claimed URL as finished successfully
    pub fn complete(&self, url: &Url) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.attempts.remove(url);
    }

    /// Returns a failed URL to the pending set, up to the attempt cap
    pub fn requeue(&self, url: Url) -> Requeue {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);

        let attempt = state.attempts.get(&url).copied().unwrap_or(0);
        if attempt >= self.max_attempts {
            state.attempts.remove(&url);
            return Requeue::GaveUp;
        }

        state.pending.insert(url);
        Requeue::Retry { attempt }
    }

    /// True when the pending set is empty and no fetch is in flight
    ///
    /// A transiently empty pending set is not terminal while any worker is
    /// mid-fetch, since that worker may still discover links; this is the
    /// only signal workers trust for shutdown.
    pub fn is_idle(&self) -> bool {
        let state = self.lock();
        state.pending.is_empty() && state.in_flight == 0
    }

    /// Number of URLs waiting to be fetched
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of URLs whose fetch has been attempted
    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://site.example{}", path)).unwrap()
    }

    #[test]
    fn test_enqueue_and_claim() {
        let frontier = Frontier::new(3);
        assert!(frontier.enqueue(url("/a")));
        assert_eq!(frontier.pending_len(), 1);

        let claimed = frontier.claim_next().unwrap();
        assert_eq!(claimed, url("/a"));
        assert_eq!(frontier.pending_len(), 0);
        assert_eq!(frontier.visited_len(), 1);
    }

    #[test]
    fn test_duplicate_enqueue_collapses() {
        let frontier = Frontier::new(3);
        assert!(frontier.enqueue(url("/a")));
        assert!(!frontier.enqueue(url("/a")));
        assert_eq!(frontier.pending_len(), 1);
    }

    #[test]
    fn test_visited_url_never_reenqueued() {
        let frontier = Frontier::new(3);
        frontier.enqueue(url("/a"));
        frontier.claim_next().unwrap();
        frontier.complete(&url("/a"));

        assert!(!frontier.enqueue(url("/a")));
        assert!(frontier.claim_next().is_none());
    }

    #[test]
    fn test_idle_only_after_in_flight_drains() {
        let frontier = Frontier::new(3);
        frontier.enqueue(url("/a"));
        assert!(!frontier.is_idle());

        let claimed = frontier.claim_next().unwrap();
        // Pending is empty but the fetch is still in flight.
        assert!(!frontier.is_idle());

        frontier.complete(&claimed);
        assert!(frontier.is_idle());
    }

    #[test]
    fn test_requeue_until_cap() {
        let frontier = Frontier::new(3);
        frontier.enqueue(url("/a"));

        let first = frontier.claim_next().unwrap();
        assert_eq!(frontier.requeue(first), Requeue::Retry { attempt: 1 });

        let second = frontier.claim_next().unwrap();
        assert_eq!(frontier.requeue(second), Requeue::Retry { attempt: 2 });

        let third = frontier.claim_next().unwrap();
        assert_eq!(frontier.requeue(third), Requeue::GaveUp);

        // Permanent failure: nothing left and the frontier drains.
        assert!(frontier.claim_next().is_none());
        assert!(frontier.is_idle());
    }

    #[test]
    fn test_requeued_url_can_be_claimed_again() {
        let frontier = Frontier::new(3);
        frontier.enqueue(url("/a"));
        let claimed = frontier.claim_next().unwrap();
        frontier.requeue(claimed.clone());

        assert_eq!(frontier.claim_next(), Some(claimed));
    }

    #[tokio::test]
    async fn test_concurrent_claims_never_duplicate() {
        // Excluding retries, the number of claims per distinct URL must be
        // at most one no matter how claims and enqueues interleave.
        let frontier = Arc::new(Frontier::new(1));
        for i in 0..100 {
            frontier.enqueue(url(&format!("/p{}", i)));
        }

        let mut handles = Vec::new();
        for _ in 0..8 {
            let frontier = frontier.clone();
            handles.push(tokio::spawn(async move {
                let mut claimed = Vec::new();
                while let Some(u) = frontier.claim_next() {
                    // Workers also race to re-enqueue already-seen URLs.
                    frontier.enqueue(u.clone());
                    claimed.push(u.clone());
                    frontier.complete(&u);
                }
                claimed
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }

        all.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let total = all.len();
        all.dedup();
        assert_eq!(total, all.len(), "a URL was claimed twice");
        assert_eq!(total, 100);
        assert!(frontier.is_idle());
    }
}
