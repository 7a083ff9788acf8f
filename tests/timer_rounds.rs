use std::time::Duration;

use waitq::{Delivery, RoundTimer};

#[tokio::test]
async fn lapse_reports_true() {
    let timer = RoundTimer::new();
    let waiter = timer.result_chan().await;

    assert!(timer.stopped());
    timer.reset(Duration::from_millis(30));
    assert!(!timer.stopped());

    assert_eq!(waiter.wait().await, Delivery::Value(true));
    assert!(timer.stopped());
}

#[tokio::test]
async fn kill_reports_false() {
    let timer = RoundTimer::new();
    let waiter = timer.result_chan().await;

    timer.reset(Duration::from_secs(10));
    timer.kill().await;

    assert_eq!(waiter.wait().await, Delivery::Value(false));
    assert!(timer.stopped());
}

#[tokio::test]
async fn reset_restarts_a_running_countdown() {
    let timer = RoundTimer::new();
    let waiter = timer.result_chan().await;

    timer.reset(Duration::from_millis(60));
    tokio::time::sleep(Duration::from_millis(30)).await;
    timer.reset(Duration::from_millis(60));

    // The original countdown would have lapsed by now; the restarted one
    // has not.
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(!timer.stopped());

    assert_eq!(waiter.wait().await, Delivery::Value(true));
}

#[tokio::test]
async fn timer_is_reusable_after_a_lapse() {
    let timer = RoundTimer::new();
    let waiter = timer.result_chan().await;

    timer.reset(Duration::from_millis(20));
    assert_eq!(waiter.wait().await, Delivery::Value(true));

    timer.reset(Duration::from_millis(20));
    assert_eq!(waiter.wait().await, Delivery::Value(true));
}

#[tokio::test]
async fn kill_without_reset_still_reports_false() {
    let timer = RoundTimer::new();
    let waiter = timer.result_chan().await;

    timer.kill().await;
    assert_eq!(waiter.wait().await, Delivery::Value(false));
}
