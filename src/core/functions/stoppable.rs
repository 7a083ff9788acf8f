use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::core::channel::{Channel, Delivery, Waiter};

/// Cooperative stop flag handed to a running user function. The function is
/// expected to check [`StopSignal::is_stopped`] at convenient points and
/// return [`Outcome::Stopped`] once it trips.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// How a user function reports its own ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Ran to completion with a value.
    Completed(T),
    /// Noticed the stop signal and bailed out.
    Stopped,
}

/// The single result object a [`StoppableFunc`] run produces.
#[derive(Debug)]
pub struct FuncResult<T> {
    pub value: Option<T>,
    pub error: Option<anyhow::Error>,
    /// True only when the function ran to completion (not stopped, not
    /// faulted).
    pub completed: bool,
}

type UserFn<T> = Box<dyn FnOnce(StopSignal) -> anyhow::Result<Outcome<T>> + Send + 'static>;

/// Runs a blocking user closure on a worker task, publishing exactly one
/// [`FuncResult`] through an internal broadcast channel.
///
/// A panic inside the closure is caught at the task join and converted into
/// an error-carrying result instead of propagating.
pub struct StoppableFunc<T> {
    func: Mutex<Option<UserFn<T>>>,
    signal: StopSignal,
    results: Channel<Arc<FuncResult<T>>>,
}

impl<T: Send + Sync + 'static> StoppableFunc<T> {
    pub fn new(
        func: impl FnOnce(StopSignal) -> anyhow::Result<Outcome<T>> + Send + 'static,
    ) -> Self {
        Self {
            func: Mutex::new(Some(Box::new(func))),
            signal: StopSignal::new(),
            results: Channel::new(),
        }
    }

    /// Stop signal for this run; clone it into whoever decides to stop the
    /// function.
    pub fn signal(&self) -> StopSignal {
        self.signal.clone()
    }

    /// Result channel, for observers other than the `start` caller.
    pub fn results(&self) -> &Channel<Arc<FuncResult<T>>> {
        &self.results
    }

    /// Executes the closure and suspends until its result is in. The run
    /// happens on a blocking worker so the closure may busy-loop while it
    /// polls the stop signal.
    pub async fn start(&self) -> Arc<FuncResult<T>> {
        let func = {
            let mut slot = self
                .func
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.take()
        };
        let Some(func) = func else {
            return Arc::new(FuncResult {
                value: None,
                error: Some(anyhow!("function already started")),
                completed: false,
            });
        };

        let waiter = self.results.register().await;
        let signal = self.signal.clone();
        let result = match tokio::task::spawn_blocking(move || func(signal)).await {
            Ok(Ok(Outcome::Completed(value))) => FuncResult {
                value: Some(value),
                error: None,
                completed: true,
            },
            Ok(Ok(Outcome::Stopped)) => FuncResult {
                value: None,
                error: None,
                completed: false,
            },
            Ok(Err(error)) => FuncResult {
                value: None,
                error: Some(error),
                completed: false,
            },
            Err(join_error) => {
                tracing::error!(
                    target: "waitq::functions",
                    %join_error,
                    "user function faulted"
                );
                let error = if join_error.is_panic() {
                    anyhow!("panic: {join_error}")
                } else {
                    anyhow!("worker task failed: {join_error}")
                };
                FuncResult {
                    value: None,
                    error: Some(error),
                    completed: false,
                }
            }
        };

        self.results.fire_once_to_all(Arc::new(result)).await;
        match waiter.wait().await {
            Delivery::Value(result) => result,
            _ => Arc::new(FuncResult {
                value: None,
                error: Some(anyhow!("result channel closed")),
                completed: false,
            }),
        }
    }

    /// Registers an additional observer for the run's result.
    pub async fn subscribe(&self) -> Waiter<Arc<FuncResult<T>>> {
        self.results.register().await
    }
}
