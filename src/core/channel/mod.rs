//! One-to-many broadcast registry over rendezvous points.
//!
//! A [`Channel`] owns a dynamic set of [`Waiter`]s. Producers fan a value out
//! to every current member, optionally closing the channel afterwards; once
//! closed, every subsequent broadcast delivers the closed-sentinel instead.

pub mod waiter;

pub use waiter::{Delivery, FireHandle, Waiter, WAITER_BUFFER};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Broadcast registry: a set of waiters that can be fired to collectively,
/// once or repeatedly, and permanently closed.
///
/// Broadcasts take the membership read lock, so concurrent broadcasts
/// interleave freely while register/deregister linearize against them.
#[derive(Debug)]
pub struct Channel<T> {
    members: RwLock<HashMap<Uuid, FireHandle<T>>>,
    closed: AtomicBool,
}

impl<T: Clone + Send + 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a new waiter and adds it to the member set.
    ///
    /// Registration always succeeds, even after the channel has closed; such
    /// a member simply observes [`Delivery::Closed`] on the next broadcast.
    pub async fn register(&self) -> Waiter<T> {
        let waiter = Waiter::new();
        let mut members = self.members.write().await;
        members.insert(waiter.id(), waiter.handle());
        tracing::trace!(
            target: "waitq::channel",
            waiter_id = %waiter.id(),
            members = members.len(),
            "registered waiter"
        );
        waiter
    }

    /// Removes a member; no-op if it was already removed. The caller keeps
    /// ownership of the waiter itself.
    pub async fn deregister(&self, waiter: &Waiter<T>) {
        let mut members = self.members.write().await;
        if members.remove(&waiter.id()).is_some() {
            tracing::trace!(
                target: "waitq::channel",
                waiter_id = %waiter.id(),
                members = members.len(),
                "deregistered waiter"
            );
        }
    }

    /// Delivers `value` to the membership snapshot held under the read lock.
    ///
    /// A waiter registered after the snapshot was taken misses this
    /// broadcast. Members receive concurrently, so the call suspends no
    /// longer than the slowest member's back-pressure delay. Once the
    /// channel is closed the broadcast carries the closed-sentinel instead.
    pub async fn fire_to_all(&self, value: T) {
        let delivery = if self.is_closed() {
            Delivery::Closed
        } else {
            Delivery::Value(value)
        };
        self.broadcast(delivery).await;
    }

    /// Broadcasts `value` then permanently closes the channel.
    pub async fn fire_once_to_all(&self, value: T) {
        self.fire_to_all(value).await;
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Closes the channel and broadcasts the closed-sentinel to every
    /// current member.
    pub async fn cancel_all(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.broadcast(Delivery::Closed).await;
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Current number of registered members.
    pub async fn members(&self) -> usize {
        self.members.read().await.len()
    }

    async fn broadcast(&self, delivery: Delivery<T>) {
        let members = self.members.read().await;
        join_all(
            members
                .values()
                .map(|handle| handle.deliver(delivery.clone())),
        )
        .await;
    }
}
