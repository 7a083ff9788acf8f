use std::time::Duration;

use waitq::{Delivery, Direction, ItemState, Queue};

#[tokio::test]
async fn completion_waiter_fires_popped() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    let waiter = q.add_stateful("item", "index").expect("admission failed");

    let observer = tokio::spawn(async move { waiter.wait().await });

    tokio::time::sleep(Duration::from_millis(25)).await;
    assert_eq!(q.pop("index"), Some("item"));

    assert_eq!(
        observer.await.unwrap(),
        Delivery::Value(ItemState::Popped)
    );
    assert_eq!(q.len(), 0);
}

#[tokio::test]
async fn completion_waiter_fires_cancelled() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    let waiter = q.add_stateful("item", "index").expect("admission failed");

    let observer = tokio::spawn(async move { waiter.wait().await });

    tokio::time::sleep(Duration::from_millis(25)).await;
    q.cancel_and_close("index");

    assert_eq!(
        observer.await.unwrap(),
        Delivery::Value(ItemState::Cancelled)
    );
    assert_eq!(q.len(), 0);
}

#[tokio::test]
async fn completion_fires_exactly_once() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    let waiter = q.add_stateful("item", "index").expect("admission failed");

    assert_eq!(q.pop("index"), Some("item"));
    // Cancelling after the pop must not produce a second notification:
    // the item left the queue when popped.
    q.cancel_and_close("index");

    assert_eq!(waiter.wait().await, Delivery::Value(ItemState::Popped));
    assert!(waiter
        .wait_timeout(Duration::from_millis(50))
        .await
        .is_lapsed());
}

#[tokio::test]
async fn cancel_leaves_other_indexes_alone() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 10);
    q.add("one", &["i1"]);
    q.add("two", &["i2"]);

    q.cancel_and_close("i1");
    assert_eq!(q.pop("i1"), None);
    assert_eq!(q.pop("i2"), Some("two"));
}

#[tokio::test]
async fn index_reusable_after_cancel() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 10);
    q.add("doomed", &["i"]);
    q.cancel_and_close("i");

    assert!(q.add("fresh", &["i"]));
    assert_eq!(q.pop("i"), Some("fresh"));
}

#[test]
fn stateful_add_rejected_at_capacity() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 1);
    assert!(q.add_stateful("a", "i").is_some());
    assert!(q.add_stateful("b", "i").is_none());
}
