//! Background task ticking a flow once per interval

use std::sync::Arc;
use std::time::Duration;

use ep_core::TickTarget;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// One second, the unit of the resend cooldown
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running tick task
///
/// The task stops when the target returns `false` from `tick`, when
/// [`CooldownTimer::cancel`] is called, or when the handle is dropped.
/// No tick is delivered after any of these.
#[derive(Debug)]
pub struct CooldownTimer {
    handle: JoinHandle<()>,
}

impl CooldownTimer {
    /// Start ticking `target` every `period`, first tick one period from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T>(target: Arc<T>, period: Duration) -> Self
    where
        T: TickTarget + ?Sized + 'static,
    {
        // Deadlines count from the call, not from the task's first poll
        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            // A stalled runtime must not replay a burst of missed seconds
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !target.tick() {
                    debug!("Tick target finished, stopping cooldown timer");
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Stop delivering ticks
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CooldownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
