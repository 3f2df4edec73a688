//! Background tickers for the storefront's rotating sections.
//!
//! Each registered ticker gets its own task. A task sleeps for the ticker's
//! period, or for the delay the ticker last asked for, and ends once the ticker
//! reports it is finished. Stopping the service (or dropping it) aborts every
//! task, so no timer outlives the service that started it.

use std::sync::Arc;
use std::time::Duration;

use botanica_core::timer::{Tick, TickOutcome};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

struct TimerTask {
    name: String,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub struct TimerService {
    tasks: Vec<TimerTask>,
}

impl TimerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking `ticker` every `period` on the current runtime.
    pub fn register<T>(&mut self, name: impl Into<String>, period: Duration, ticker: Arc<Mutex<T>>)
    where
        T: Tick + 'static,
    {
        let name = name.into();
        info!(
            event_name = "system.timer.registered",
            correlation_id = "bootstrap",
            timer = %name,
            period_ms = period_millis(period),
            "timer registered"
        );

        let task_name = name.clone();
        let handle = tokio::spawn(async move { run_ticker(task_name, period, ticker).await });
        self.tasks.push(TimerTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of registered tickers that are still running.
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|task| !task.handle.is_finished()).count()
    }

    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.handle.abort();
            debug!(event_name = "system.timer.stopped", timer = %task.name, "timer stopped");
        }
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Whole milliseconds in `period`, saturating at `u64::MAX`.
fn period_millis(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
}

async fn run_ticker<T>(name: String, period: Duration, ticker: Arc<Mutex<T>>)
where
    T: Tick + 'static,
{
    let mut delay = period;
    loop {
        tokio::time::sleep(delay).await;
        let outcome = ticker.lock().await.tick();
        delay = match outcome {
            TickOutcome::Continue => period,
            TickOutcome::Delay(next) => next,
            TickOutcome::Finished => {
                debug!(event_name = "system.timer.finished", timer = %name, "timer finished");
                return;
            }
        };
    }
}
