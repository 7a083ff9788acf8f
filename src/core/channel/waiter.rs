//! Single-consumer rendezvous point with a small bounded delivery buffer.
//!
//! A `Waiter` is the receiving half of a one-shot-style handoff slot: one
//! consumer blocks on [`Waiter::wait`] while any number of producers deposit
//! deliveries through [`Waiter::fire`] or a cloned [`FireHandle`]. Deliveries
//! queue up to [`WAITER_BUFFER`] deep; beyond that a producer suspends until
//! the consumer drains a slot (back-pressure, not drop).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use uuid::Uuid;

/// Depth of a waiter's delivery buffer.
pub const WAITER_BUFFER: usize = 5;

/// What a [`Waiter`] hands back to its consumer.
///
/// Expected outcomes are values, not errors: a closed broadcast channel
/// delivers [`Delivery::Closed`], an elapsed wait deadline yields
/// [`Delivery::Lapsed`]. Consumers discriminate by matching the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<T> {
    /// A regular value deposited by a producer.
    Value(T),
    /// Closed-sentinel broadcast by a cancelled registry.
    Closed,
    /// Deadline sentinel produced locally by a timed-out wait.
    Lapsed,
}

impl<T> Delivery<T> {
    /// Returns the carried value, discarding sentinels.
    pub fn into_value(self) -> Option<T> {
        match self {
            Delivery::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Delivery::Closed)
    }

    pub fn is_lapsed(&self) -> bool {
        matches!(self, Delivery::Lapsed)
    }
}

/// Producer side of a [`Waiter`], clonable and shareable across tasks.
#[derive(Debug, Clone)]
pub struct FireHandle<T> {
    tx: mpsc::Sender<Delivery<T>>,
}

impl<T> FireHandle<T> {
    /// Deposits a value; suspends while the buffer is full.
    pub async fn fire(&self, value: T) {
        self.deliver(Delivery::Value(value)).await;
    }

    /// Deposits a delivery as-is. An abandoned waiter (receiver dropped)
    /// swallows the delivery rather than erroring.
    pub(crate) async fn deliver(&self, delivery: Delivery<T>) {
        let _ = self.tx.send(delivery).await;
    }

    /// Non-suspending deposit. Only correct when the caller can guarantee a
    /// free buffer slot, e.g. a handle fired at most once in its lifetime.
    pub(crate) fn try_deliver(&self, delivery: Delivery<T>) {
        let _ = self.tx.try_send(delivery);
    }
}

/// Blocking handoff slot returned by [`Channel::register`] or owned by a
/// queue item for completion notification.
///
/// [`Channel::register`]: crate::core::channel::Channel::register
#[derive(Debug)]
pub struct Waiter<T> {
    id: Uuid,
    tx: mpsc::Sender<Delivery<T>>,
    rx: tokio::sync::Mutex<mpsc::Receiver<Delivery<T>>>,
}

impl<T> Waiter<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(WAITER_BUFFER);
        Self {
            id: Uuid::new_v4(),
            tx,
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    /// Identity used by a broadcast registry to track membership.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Producer handle for this waiter.
    pub fn handle(&self) -> FireHandle<T> {
        FireHandle {
            tx: self.tx.clone(),
        }
    }

    /// Deposits a value into the buffer; suspends while the buffer is full.
    pub async fn fire(&self, value: T) {
        self.handle().fire(value).await;
    }

    /// Suspends until a delivery arrives, draining oldest-first.
    pub async fn wait(&self) -> Delivery<T> {
        let mut rx = self.rx.lock().await;
        // The waiter holds its own sender, so the channel cannot close
        // while `self` is alive.
        rx.recv().await.unwrap_or(Delivery::Closed)
    }

    /// Like [`Waiter::wait`] but gives up after `duration`, yielding
    /// [`Delivery::Lapsed`]. A value racing the deadline may win either way.
    pub async fn wait_timeout(&self, duration: Duration) -> Delivery<T> {
        self.wait_deadline(Instant::now() + duration).await
    }

    /// Like [`Waiter::wait`] but gives up at `deadline`.
    pub async fn wait_deadline(&self, deadline: Instant) -> Delivery<T> {
        match tokio::time::timeout_at(deadline, self.wait()).await {
            Ok(delivery) => delivery,
            Err(_) => Delivery::Lapsed,
        }
    }
}

impl<T> Default for Waiter<T> {
    fn default() -> Self {
        Self::new()
    }
}
