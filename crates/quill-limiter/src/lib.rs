//! Quill Rate Limiter
//!
//! Per-actor sliding-window request budgets. The limiter is defined
//! against a [`BudgetStore`] trait so the in-memory map shipped here and a
//! distributed key-value backend are interchangeable implementations of
//! the same contract; within one process, check-and-consume is atomic per
//! actor.
//!
//! Reference budget: at most 10 requests per actor inside a trailing 60s
//! window.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod clock;
pub mod limiter;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{
    RateLimitExceeded, RateLimiter, DEFAULT_HIGH_WATER, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW,
};
pub use store::{Admission, BudgetStore, InMemoryBudgetStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
