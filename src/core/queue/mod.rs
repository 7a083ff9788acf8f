//! Policy-driven indexed queue.
//!
//! A [`Queue`] is a bounded store partitioned by an arbitrary string index
//! into independent FIFO/LIFO sub-queues sharing one capacity bound. Every
//! entry carries its own set of eviction policies, instantiated from the
//! queue's policy factories, and a one-shot completion notifier. Expired or
//! cancelled entries are swept lazily whenever admission or retrieval runs.

pub mod item;
pub mod policies;

pub use item::{ItemState, StatefulItem};

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Deserialize;

use crate::core::channel::Waiter;
use crate::core::queue::policies::{CancelledPolicy, PolicyFactory, PolicyManager};

/// Index used when an add names no index.
pub const DEFAULT_INDEX: &str = "";

/// Alias for a queue index key.
pub type Index = String;

/// Retrieval direction of a queue instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Fifo,
    Lifo,
}

/// Interval between retrieval attempts of the `pop_wait` bridge task.
const POP_WAIT_INTERVAL: Duration = Duration::from_millis(20);

struct State<T> {
    buckets: HashMap<Index, VecDeque<StatefulItem<T>>>,
    count: usize,
}

struct Inner<T> {
    direction: Direction,
    capacity: usize,
    factories: Vec<PolicyFactory>,
    poll_interval: Duration,
    state: Mutex<State<T>>,
}

/// Bounded, keyed FIFO/LIFO store with lazy policy-driven eviction.
///
/// The handle is cheap to clone; all clones share one store. A single
/// exclusive lock covers the index map and the running count, and is never
/// held across a suspension point.
pub struct Queue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Queue<T> {
    pub fn new(direction: Direction, capacity: usize) -> Self {
        Self::with_policies(direction, capacity, Vec::new())
    }

    /// Builds a queue whose every new entry is armed with one policy from
    /// each of the given factories.
    pub fn with_policies(
        direction: Direction,
        capacity: usize,
        factories: Vec<PolicyFactory>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                direction,
                capacity,
                factories,
                poll_interval: POP_WAIT_INTERVAL,
                state: Mutex::new(State {
                    buckets: HashMap::new(),
                    count: 0,
                }),
            }),
        }
    }

    /// Builder-style override of the `pop_wait` polling interval. Effective
    /// only before the handle has been cloned.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.poll_interval = interval;
        }
        self
    }

    pub fn direction(&self) -> Direction {
        self.inner.direction
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Adds `payload` under each requested index, or under
    /// [`DEFAULT_INDEX`] when `indexes` is empty.
    ///
    /// Admission is all-or-nothing: if the running count plus the number of
    /// requested indexes would exceed capacity, a full eviction sweep runs
    /// first; if still over, nothing is added and `false` is returned. Each
    /// admitted index gets its own item with independently instantiated
    /// policies, so per-index duplicates expire on their own clocks.
    pub fn add(&self, payload: T, indexes: &[&str]) -> bool {
        let indexes: &[&str] = if indexes.is_empty() {
            &[DEFAULT_INDEX]
        } else {
            indexes
        };

        let mut state = self.state();
        if !self.admit(&mut state, indexes.len()) {
            return false;
        }

        for index in indexes {
            let item = StatefulItem::new(payload.clone(), self.new_manager());
            state
                .buckets
                .entry((*index).to_string())
                .or_default()
                .push_back(item);
            state.count += 1;
        }
        true
    }

    /// Single-index add that hands back the item's completion waiter, which
    /// fires [`ItemState::Popped`] or [`ItemState::Cancelled`] exactly once.
    /// Returns `None` when admission fails.
    pub fn add_stateful(&self, payload: T, index: &str) -> Option<Waiter<ItemState>> {
        let mut state = self.state();
        if !self.admit(&mut state, 1) {
            return None;
        }

        let mut item = StatefulItem::new(payload, self.new_manager());
        let waiter = item.take_waiter();
        state
            .buckets
            .entry(index.to_string())
            .or_default()
            .push_back(item);
        state.count += 1;
        waiter
    }

    /// Removes and returns the oldest (FIFO) or newest (LIFO) surviving
    /// entry at `index`, firing its popped notification. Expired entries
    /// across all indices are swept first. `None` when the bucket is absent
    /// or empty after the sweep.
    pub fn pop(&self, index: &str) -> Option<T> {
        let mut state = self.state();
        self.sweep(&mut state);

        let bucket = state.buckets.get_mut(index)?;
        let item = match self.inner.direction {
            Direction::Fifo => bucket.pop_front(),
            Direction::Lifo => bucket.pop_back(),
        }?;
        if bucket.is_empty() {
            state.buckets.remove(index);
        }
        state.count -= 1;
        drop(state);

        Some(item.popped())
    }

    /// Returns a waiter that eventually receives one popped payload from
    /// `index`.
    ///
    /// Bridged by a background task retrying [`Queue::pop`] on a fixed
    /// interval and firing the waiter on the first hit, after which it
    /// exits even if the waiter was abandoned. Must be called from within
    /// a tokio runtime.
    pub fn pop_wait(&self, index: &str) -> Waiter<T> {
        let waiter = Waiter::new();
        let handle = waiter.handle();
        let queue = self.clone();
        let index = index.to_string();
        let interval = self.inner.poll_interval;

        tokio::spawn(async move {
            loop {
                if let Some(payload) = queue.pop(&index) {
                    handle.fire(payload).await;
                    return;
                }
                tokio::time::sleep(interval).await;
            }
        });

        waiter
    }

    /// Cancels every surviving entry at `index`: fires its cancelled
    /// notification, appends a cancelled-marker policy, then sweeps so the
    /// markers take effect immediately. Other indices are untouched, and
    /// entries added to `index` afterwards are unaffected.
    pub fn cancel_and_close(&self, index: &str) {
        let mut state = self.state();
        if let Some(bucket) = state.buckets.get_mut(index) {
            for item in bucket.iter_mut() {
                item.cancelled();
                item.manager_mut()
                    .add_policy(Box::new(CancelledPolicy::new()));
            }
            tracing::debug!(
                target: "waitq::queue",
                index,
                cancelled = bucket.len(),
                "cancelled index"
            );
        }
        self.sweep(&mut state);
    }

    /// Running count of stored entries. An upper bound on live entries:
    /// time-expired entries linger until the next add/pop triggers a sweep.
    pub fn len(&self) -> usize {
        self.state().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity admission for `requested` new entries, sweeping once if the
    /// first check fails.
    fn admit(&self, state: &mut MutexGuard<'_, State<T>>, requested: usize) -> bool {
        if state.count + requested <= self.inner.capacity {
            return true;
        }
        self.sweep(state);
        if state.count + requested <= self.inner.capacity {
            return true;
        }
        tracing::warn!(
            target: "waitq::queue",
            count = state.count,
            requested,
            capacity = self.inner.capacity,
            "add rejected: queue at capacity"
        );
        false
    }

    fn new_manager(&self) -> PolicyManager {
        PolicyManager::new(self.inner.factories.iter().map(|f| f()).collect())
    }

    /// Discards every entry whose policy manager votes to evacuate, across
    /// all indices, dropping emptied bucket keys.
    fn sweep(&self, state: &mut MutexGuard<'_, State<T>>) {
        let before = state.count;
        for bucket in state.buckets.values_mut() {
            bucket.retain(|item| !item.manager().evacuate());
        }
        state.buckets.retain(|_, bucket| !bucket.is_empty());
        state.count = state.buckets.values().map(VecDeque::len).sum();

        let evicted = before - state.count;
        if evicted > 0 {
            tracing::debug!(
                target: "waitq::queue",
                evicted,
                remaining = state.count,
                "eviction sweep"
            );
        }
    }

    fn state(&self) -> MutexGuard<'_, State<T>> {
        // A task that panics while holding the lock leaves it poisoned;
        // recover the guard rather than propagate the panic to every user.
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("direction", &self.inner.direction)
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}
