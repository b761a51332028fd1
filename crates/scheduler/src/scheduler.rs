//! Supervising loop around [`PassRunner`].
//!
//! The scheduler is the only retry layer. A pass that returns an error or
//! panics is logged, followed by the short cooldown, and then retried. A
//! completed pass is followed by the full interval. Stop requests are honored
//! at pass boundaries and during either sleep, never mid-pass.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::Instant;

use huntbot_core::duration::format_duration;

use crate::error::PipelineError;
use crate::pipeline::{PassRunner, PassSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Result of one supervised pass.
#[derive(Debug)]
pub enum PassOutcome {
    Completed(PassSummary),
    Failed(PipelineError),
}

pub struct Scheduler {
    interval: Duration,
    cooldown: Duration,
    state: SchedulerState,
    passes: u64,
}

impl Scheduler {
    pub fn new(interval: Duration, cooldown: Duration) -> Self {
        Self {
            interval,
            cooldown,
            state: SchedulerState::Stopped,
            passes: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Passes attempted so far, failed ones included.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run a single pass, converting a panic into [`PipelineError::Panicked`].
    pub async fn run_once<R>(&mut self, runner: &mut R) -> PassOutcome
    where
        R: PassRunner + ?Sized,
    {
        self.passes += 1;
        let pass = self.passes;

        let result = match AssertUnwindSafe(runner.run_pass()).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(PipelineError::Panicked(panic_message(&*panic))),
        };

        match result {
            Ok(summary) => {
                tracing::info!(
                    pass,
                    sent = summary.sent,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "pass finished"
                );
                PassOutcome::Completed(summary)
            }
            Err(e) => {
                tracing::error!(pass, error = %e, "pass failed");
                PassOutcome::Failed(e)
            }
        }
    }

    /// Repeat passes until `stop` carries `true`.
    pub async fn run<R>(&mut self, runner: &mut R, mut stop: watch::Receiver<bool>)
    where
        R: PassRunner + ?Sized,
    {
        self.state = SchedulerState::Running;
        tracing::info!(
            interval = %format_duration(self.interval),
            cooldown = %format_duration(self.cooldown),
            "scheduler started"
        );

        while !*stop.borrow_and_update() {
            let wait = match self.run_once(runner).await {
                PassOutcome::Completed(_) => self.interval,
                PassOutcome::Failed(_) => {
                    tracing::warn!(cooldown = %format_duration(self.cooldown), "retrying after cooldown");
                    self.cooldown
                }
            };

            tracing::info!(next_in = %format_duration(wait), "sleeping until next pass");
            if sleep_or_stop(wait, &mut stop).await {
                break;
            }
        }

        self.state = SchedulerState::Stopped;
        tracing::info!(passes = self.passes, "scheduler stopped");
    }
}

/// Stand-in deadline for waits too long to represent.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 86_400);

/// Sleep for `wait`; returns `true` if a stop was requested first.
async fn sleep_or_stop(wait: Duration, stop: &mut watch::Receiver<bool>) -> bool {
    let now = Instant::now();
    let deadline = now.checked_add(wait).unwrap_or_else(|| now + FAR_FUTURE);
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => return false,
            changed = stop.changed() => {
                if changed.is_err() {
                    // Sender gone: nobody can stop us any more.
                    tokio::time::sleep_until(deadline).await;
                    return false;
                }
                if *stop.borrow_and_update() {
                    return true;
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
