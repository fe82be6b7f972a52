//! Resend countdown timer.
//!
//! One second per tick, counting down to zero. The task publishes the
//! remaining seconds through a watch channel and ends itself at zero; the
//! owning [`Countdown`] handle aborts it on drop, so a torn-down login view
//! can never leak a ticking timer.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owning handle for a running countdown. Dropping it cancels the task.
#[derive(Debug)]
pub struct Countdown {
    remaining: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start a countdown from `seconds`, ticking once per second.
    pub fn start(seconds: u32) -> Self {
        Self::with_period(seconds, Duration::from_secs(1))
    }

    /// Start with a custom tick period. Tests use a millisecond period so a
    /// full countdown elapses without real waiting.
    pub fn with_period(seconds: u32, period: Duration) -> Self {
        let (tx, remaining) = watch::channel(seconds);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick on a fresh interval completes immediately.
            interval.tick().await;

            let mut left = seconds;
            while left > 0 {
                interval.tick().await;
                left -= 1;
                if tx.send(left).is_err() {
                    break;
                }
            }
        });
        Self { remaining, task }
    }

    /// Seconds left. Zero means the resend action is unlocked.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining() == 0
    }

    /// Stop ticking immediately. Also happens on drop.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
