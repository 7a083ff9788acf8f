//! Pluggable eviction policies for queued items.
//!
//! A policy is a predicate deciding whether an entry should be discarded
//! instead of returned. The built-in set is closed: a time-based policy
//! ([`TimePolicy`]) and a cancelled-marker ([`CancelledPolicy`]). Policies
//! attach to an item through a [`PolicyManager`], which ORs them together.
//!
//! Queues hold policy *factories* rather than policies so that every new
//! entry gets independent state, notably an independent expiry clock.

mod cancelled;
mod manager;
mod time;

pub use cancelled::{cancelled_policy, CancelledPolicy};
pub use manager::PolicyManager;
pub use time::{time_policy, TimePolicy};

use std::sync::Arc;

/// Predicate deciding whether a queued entry should be evacuated.
///
/// Evaluation must be idempotent: repeated calls with no state change give
/// the same answer, except the time-based variant whose answer is monotonic
/// (false to true, never back).
pub trait Policy: Send + Sync {
    /// Returns true if the entry should be evacuated from its queue.
    fn evacuate(&self) -> bool;
}

/// Constructor invoked once per new queue entry.
pub type PolicyFactory = Arc<dyn Fn() -> Box<dyn Policy> + Send + Sync>;
