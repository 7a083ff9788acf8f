//! Stoppable user-function runners.
//!
//! [`StoppableFunc`] executes a blocking user closure on a worker task and
//! hands back exactly one result object, racing the closure against an
//! external stop signal. [`run_with_timeout`] layers a deadline on top via a
//! [`RoundTimer`].
//!
//! [`RoundTimer`]: crate::core::timer::RoundTimer

pub mod stoppable;
pub mod timeout;

pub use stoppable::{FuncResult, Outcome, StopSignal, StoppableFunc};
pub use timeout::run_with_timeout;
