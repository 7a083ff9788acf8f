use std::sync::Arc;
use std::time::Duration;

use crate::core::functions::stoppable::{FuncResult, Outcome, StopSignal, StoppableFunc};
use crate::core::timer::RoundTimer;

/// Runs `func` with a deadline: once `timeout` lapses the function's stop
/// signal trips and the function is expected to wind down cooperatively.
///
/// The returned result is the run's single [`FuncResult`]; `completed` is
/// false when the deadline cut the run short.
pub async fn run_with_timeout<T: Send + Sync + 'static>(
    func: impl FnOnce(StopSignal) -> anyhow::Result<Outcome<T>> + Send + 'static,
    timeout: Duration,
) -> Arc<FuncResult<T>> {
    let stoppable = StoppableFunc::new(func);
    let signal = stoppable.signal();

    let timer = RoundTimer::new();
    let lapse = timer.result_chan().await;
    tokio::spawn(async move {
        lapse.wait().await;
        signal.stop();
    });
    timer.reset(timeout);

    let result = stoppable.start().await;
    timer.kill().await;
    result
}
