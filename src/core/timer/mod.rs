//! Resettable round timer publishing its outcome through a broadcast channel.
//!
//! A [`RoundTimer`] counts down once per [`RoundTimer::reset`]; observers
//! register on the result channel and receive `true` on natural lapse or
//! `false` when the timer is killed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::core::channel::{Channel, Delivery, Waiter};

#[derive(Debug)]
struct TimerState {
    countdown: Option<JoinHandle<()>>,
    loop_running: bool,
    stopped: bool,
}

#[derive(Debug)]
struct TimerInner {
    // internal triggers when the countdown lapses (true) or dies (false);
    // the event loop republishes lapses onto results.
    internal: Channel<bool>,
    results: Channel<bool>,
    state: Mutex<TimerState>,
}

/// Restartable countdown with broadcast results.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    inner: Arc<TimerInner>,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TimerInner {
                internal: Channel::new(),
                results: Channel::new(),
                state: Mutex::new(TimerState {
                    countdown: None,
                    loop_running: false,
                    stopped: true,
                }),
            }),
        }
    }

    /// Registers a waiter on the result channel: `true` if the timer
    /// lapses, `false` if it is killed.
    pub async fn result_chan(&self) -> Waiter<bool> {
        self.inner.results.register().await
    }

    /// (Re)starts the countdown for `duration`. A running countdown is
    /// restarted in place; the first reset also spawns the event loop that
    /// republishes lapses to result-channel observers. Must be called from
    /// within a tokio runtime.
    pub fn reset(&self, duration: Duration) {
        let mut state = lock(&self.inner.state);
        state.stopped = false;

        if let Some(running) = state.countdown.take() {
            running.abort();
        }
        if !state.loop_running {
            state.loop_running = true;
            tokio::spawn(event_loop(Arc::clone(&self.inner)));
        }
        state.countdown = Some(tokio::spawn(countdown(Arc::clone(&self.inner), duration)));
        tracing::debug!(target: "waitq::timer", ?duration, "countdown armed");
    }

    /// `true` when no countdown is live.
    pub fn stopped(&self) -> bool {
        lock(&self.inner.state).stopped
    }

    /// Stops the countdown and reports `false` on the result channel.
    pub async fn kill(&self) {
        {
            let mut state = lock(&self.inner.state);
            if let Some(running) = state.countdown.take() {
                running.abort();
            }
            state.stopped = true;
            state.loop_running = false;
        }
        // Shut the event loop down before reporting.
        self.inner.internal.fire_to_all(false).await;
        self.inner.results.fire_to_all(false).await;
        tracing::debug!(target: "waitq::timer", "timer killed");
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new()
    }
}

async fn countdown(inner: Arc<TimerInner>, duration: Duration) {
    tokio::time::sleep(duration).await;
    {
        let mut state = lock(&inner.state);
        state.countdown = None;
        state.stopped = true;
        state.loop_running = false;
    }
    // Lapse, then stop the event loop; deliveries queue in order.
    inner.internal.fire_to_all(true).await;
    inner.internal.fire_to_all(false).await;
}

async fn event_loop(inner: Arc<TimerInner>) {
    let waiter = inner.internal.register().await;
    loop {
        match waiter.wait().await {
            Delivery::Value(true) => inner.results.fire_to_all(true).await,
            _ => break,
        }
    }
    inner.internal.deregister(&waiter).await;
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
