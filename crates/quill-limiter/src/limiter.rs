//! The rate limiter facade

use crate::clock::{Clock, SystemClock};
use crate::store::{Admission, BudgetStore, InMemoryBudgetStore};
use std::sync::Arc;
use std::time::Duration;

/// Actor over budget for the current window
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded for actor '{actor}', retry in {retry_after:?}")]
pub struct RateLimitExceeded {
    /// Actor that was refused
    pub actor: String,
    /// Time until the oldest windowed request expires
    pub retry_after: Duration,
}

/// Trailing window size of the reference budget
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
/// Requests admitted per actor per window
pub const DEFAULT_MAX_REQUESTS: usize = 10;
/// Tracked-actor count that triggers compaction
pub const DEFAULT_HIGH_WATER: usize = 512;

/// Per-actor sliding-window rate limiter
///
/// Check-and-consume is a single atomic step from the caller's point of
/// view; atomicity per actor is delegated to the [`BudgetStore`].
pub struct RateLimiter<S = InMemoryBudgetStore> {
    store: S,
    clock: Arc<dyn Clock>,
    window: Duration,
    cap: usize,
    high_water: usize,
}

impl RateLimiter<InMemoryBudgetStore> {
    /// Limiter with the reference budget over the in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(InMemoryBudgetStore::new())
    }
}

impl Default for RateLimiter<InMemoryBudgetStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BudgetStore> RateLimiter<S> {
    /// Limiter with the reference budget over a custom store
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            window: DEFAULT_WINDOW,
            cap: DEFAULT_MAX_REQUESTS,
            high_water: DEFAULT_HIGH_WATER,
        }
    }

    /// Override the window size
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Override the per-window cap
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Override the compaction high-water mark
    #[must_use]
    pub fn with_high_water(mut self, high_water: usize) -> Self {
        self.high_water = high_water;
        self
    }

    /// Override the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Consume one slot for the actor, or refuse
    ///
    /// # Errors
    /// `RateLimitExceeded` once the actor has used its full budget inside
    /// the trailing window; the error carries when a slot frees up.
    pub fn check_and_consume(&self, actor: &str) -> Result<(), RateLimitExceeded> {
        let now = self.clock.now();
        match self.store.admit(actor, now, self.window, self.cap) {
            Admission::Admitted { used } => {
                tracing::debug!(actor, used, cap = self.cap, "request admitted");
                if self.store.tracked_actors() > self.high_water {
                    self.store.purge_stale(now, self.window);
                }
                Ok(())
            }
            Admission::Refused { retry_after } => {
                tracing::warn!(actor, ?retry_after, "rate limit exceeded");
                Err(RateLimitExceeded {
                    actor: actor.to_string(),
                    retry_after,
                })
            }
        }
    }
}

impl<S: BudgetStore> std::fmt::Debug for RateLimiter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("window", &self.window)
            .field("cap", &self.cap)
            .field("high_water", &self.high_water)
            .finish()
    }
}
