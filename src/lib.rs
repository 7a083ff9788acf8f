//! waitq – a lightweight concurrency-primitives toolkit.
//!
//! This crate exports
//!  * `core::channel`   – rendezvous waiters and one-to-many broadcast
//!  * `core::queue`     – bounded indexed queues with pluggable eviction
//!  * `core::timer`     – resettable round timer over a broadcast channel
//!  * `core::functions` – stoppable/timed user-function runners
//!  * `config`          – TOML-driven queue settings
//!
//! Downstream applications embed the primitives directly; there is no
//! server surface, everything is in-process.

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod config;
pub mod core;
pub mod logging;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use crate::config::{load_config, Config, QueueSettings};
pub use crate::core::channel::{Channel, Delivery, FireHandle, Waiter, WAITER_BUFFER};
pub use crate::core::functions::{run_with_timeout, FuncResult, Outcome, StopSignal, StoppableFunc};
pub use crate::core::queue::policies::{
    cancelled_policy, time_policy, CancelledPolicy, Policy, PolicyFactory, PolicyManager,
    TimePolicy,
};
pub use crate::core::queue::{Direction, ItemState, Queue, StatefulItem, DEFAULT_INDEX};
pub use crate::core::timer::RoundTimer;
