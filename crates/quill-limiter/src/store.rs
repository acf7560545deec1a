//! Budget storage contract and the in-memory implementation

use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Outcome of one atomic check-and-consume step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A slot was consumed; `used` slots are now occupied in the window
    Admitted {
        /// Occupied slots after this admission
        used: usize,
    },
    /// The actor is over budget until `retry_after` elapses
    Refused {
        /// Time until the oldest windowed request expires
        retry_after: Duration,
    },
}

/// Storage backing the per-actor budgets
///
/// `admit` must be atomic per actor: two concurrent calls for the same
/// actor must never both observe capacity when only one slot remains. A
/// distributed backend (key-value store with TTL and atomic increment)
/// implements the same contract per-instance-free.
pub trait BudgetStore: Send + Sync {
    /// Prune stale entries, check capacity and consume one slot, atomically
    fn admit(&self, actor: &str, now: Instant, window: Duration, cap: usize) -> Admission;

    /// Drop actors whose entire request history has left the window
    fn purge_stale(&self, now: Instant, window: Duration);

    /// Number of actors currently tracked
    fn tracked_actors(&self) -> usize;
}

impl BudgetStore for Box<dyn BudgetStore> {
    fn admit(&self, actor: &str, now: Instant, window: Duration, cap: usize) -> Admission {
        (**self).admit(actor, now, window, cap)
    }

    fn purge_stale(&self, now: Instant, window: Duration) {
        (**self).purge_stale(now, window);
    }

    fn tracked_actors(&self) -> usize {
        (**self).tracked_actors()
    }
}

/// Process-local budget map
///
/// Best-effort per instance under horizontal scaling; the [`BudgetStore`]
/// seam is where a shared backend plugs in. State carries no persistence
/// guarantee and resets on process restart.
#[derive(Debug, Default)]
pub struct InMemoryBudgetStore {
    actors: DashMap<String, VecDeque<Instant>>,
}

impl InMemoryBudgetStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn prune(queue: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while queue
        .front()
        .is_some_and(|&t| now.duration_since(t) >= window)
    {
        queue.pop_front();
    }
}

impl BudgetStore for InMemoryBudgetStore {
    fn admit(&self, actor: &str, now: Instant, window: Duration, cap: usize) -> Admission {
        // The dashmap entry guard holds the shard lock for the whole
        // read-modify-write, which makes admission atomic per actor.
        let mut entry = self.actors.entry(actor.to_string()).or_default();
        let queue = entry.value_mut();
        prune(queue, now, window);

        if queue.len() >= cap {
            let retry_after = queue
                .front()
                .map(|&oldest| window.saturating_sub(now.duration_since(oldest)))
                .unwrap_or(window);
            return Admission::Refused { retry_after };
        }

        queue.push_back(now);
        Admission::Admitted { used: queue.len() }
    }

    fn purge_stale(&self, now: Instant, window: Duration) {
        self.actors.retain(|_, queue| {
            prune(queue, now, window);
            !queue.is_empty()
        });
    }

    fn tracked_actors(&self) -> usize {
        self.actors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn admits_until_cap() {
        let store = InMemoryBudgetStore::new();
        let now = Instant::now();

        for used in 1..=3 {
            assert_eq!(
                store.admit("u1", now, WINDOW, 3),
                Admission::Admitted { used }
            );
        }
        assert!(matches!(
            store.admit("u1", now, WINDOW, 3),
            Admission::Refused { .. }
        ));
    }

    #[test]
    fn actors_are_budgeted_independently() {
        let store = InMemoryBudgetStore::new();
        let now = Instant::now();

        assert!(matches!(
            store.admit("u1", now, WINDOW, 1),
            Admission::Admitted { .. }
        ));
        assert!(matches!(
            store.admit("u2", now, WINDOW, 1),
            Admission::Admitted { .. }
        ));
        assert!(matches!(
            store.admit("u1", now, WINDOW, 1),
            Admission::Refused { .. }
        ));
    }

    #[test]
    fn refusal_reports_time_until_a_slot_frees() {
        let store = InMemoryBudgetStore::new();
        let start = Instant::now();

        store.admit("u1", start, WINDOW, 1);
        let later = start + Duration::from_secs(20);
        match store.admit("u1", later, WINDOW, 1) {
            Admission::Refused { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(40));
            }
            other => panic!("expected refusal, got {other:?}"),
        }
    }

    #[test]
    fn purge_drops_fully_stale_actors_only() {
        let store = InMemoryBudgetStore::new();
        let start = Instant::now();

        store.admit("stale", start, WINDOW, 10);
        store.admit("fresh", start + Duration::from_secs(59), WINDOW, 10);
        assert_eq!(store.tracked_actors(), 2);

        store.purge_stale(start + WINDOW, WINDOW);
        assert_eq!(store.tracked_actors(), 1);
    }

    #[test]
    fn concurrent_admissions_never_exceed_cap() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryBudgetStore::new());
        let now = Instant::now();
        let cap = 10;

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    matches!(
                        store.admit("u1", now, WINDOW, cap),
                        Admission::Admitted { .. }
                    )
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&admitted| admitted)
            .count();
        assert_eq!(admitted, cap);
    }
}
