use crate::core::channel::{Delivery, FireHandle, Waiter};
use crate::core::queue::policies::PolicyManager;

/// Terminal state of a queued item, delivered through its completion waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Popped,
    Cancelled,
}

/// Queue entry wrapping a payload, its eviction policies, and a one-shot
/// completion notifier distinguishing "popped" from "cancelled".
///
/// The completion waiter fires at most once over the item's lifetime, only
/// from the owning queue. With a delivery buffer deeper than one and a
/// single lifetime firing, the fire never suspends, so the queue notifies
/// without awaiting.
#[derive(Debug)]
pub struct StatefulItem<T> {
    payload: T,
    manager: PolicyManager,
    notify: FireHandle<ItemState>,
    waiter: Option<Waiter<ItemState>>,
}

impl<T> StatefulItem<T> {
    pub fn new(payload: T, manager: PolicyManager) -> Self {
        let waiter = Waiter::new();
        Self {
            payload,
            manager,
            notify: waiter.handle(),
            waiter: Some(waiter),
        }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn manager(&self) -> &PolicyManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut PolicyManager {
        &mut self.manager
    }

    /// Hands the completion waiter to an external observer. Returns `None`
    /// once taken; if never taken the waiter drops with the item and
    /// notifications are swallowed.
    pub fn take_waiter(&mut self) -> Option<Waiter<ItemState>> {
        self.waiter.take()
    }

    /// Fires the popped notification and releases the payload. Called by
    /// the queue exactly once, at the moment of successful retrieval.
    pub(crate) fn popped(self) -> T {
        self.notify.try_deliver(Delivery::Value(ItemState::Popped));
        self.payload
    }

    /// Fires the cancelled notification. Called by the queue exactly once,
    /// only on the cancel-and-close path.
    pub(crate) fn cancelled(&self) {
        self.notify
            .try_deliver(Delivery::Value(ItemState::Cancelled));
    }
}
