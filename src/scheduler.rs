//! Timer + callback abstraction for background jobs.
//!
//! A [`Schedule`] only answers "when is the next run?"; [`spawn`] owns the
//! sleeping and invoking. Keeping the two apart lets cadence and wall-clock
//! alignment be tested without a runtime or a server.

use std::future::Future;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run once at startup, then every period after the previous scheduled run.
    Every(Duration),
    /// Run daily at this local wall-clock time.
    DailyAt(NaiveTime),
}

impl Schedule {
    pub fn next_run(&self, now: NaiveDateTime, last_run: Option<NaiveDateTime>) -> NaiveDateTime {
        match *self {
            Schedule::Every(period) => match last_run {
                None => now,
                Some(last) => {
                    let period = chrono::Duration::from_std(period)
                        .unwrap_or_else(|_| chrono::Duration::days(1));
                    last + period
                }
            },
            Schedule::DailyAt(at) => {
                let candidate = now.date().and_time(at);
                if candidate > now {
                    candidate
                } else {
                    candidate + chrono::Duration::days(1)
                }
            }
        }
    }
}

/// Spawns `job` on the tokio runtime and runs it forever on `schedule`.
/// A run that overruns its slot is followed immediately by the next one.
pub fn spawn<F, Fut>(name: &'static str, schedule: Schedule, job: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tracing::info!(job = name, ?schedule, "Scheduled job started");
        let mut last_run = None;
        loop {
            let now = Local::now().naive_local();
            let next = schedule.next_run(now, last_run);
            let delay = (next - now).to_std().unwrap_or(Duration::ZERO);
            if !delay.is_zero() {
                tracing::debug!(job = name, %next, "Waiting for next run");
                tokio::time::sleep(delay).await;
            }
            last_run = Some(next);
            job().await;
        }
    })
}
