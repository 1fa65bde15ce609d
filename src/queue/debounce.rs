//! Cancellable quiet-period timer

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs a job once its input has been stable for a quiet period.
///
/// Every [`Debouncer::schedule`] aborts the pending timer and starts a new one,
/// so only the most recently scheduled job ever runs. Once the timer fires the
/// job runs on its own task; aborting afterwards does not cancel it.
pub struct Debouncer {
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a new debouncer with the given quiet period
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Get the quiet period
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule `job`, replacing any pending one
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet_period = self.quiet_period;
        let mut pending = self.pending.lock();

        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                debug!("Rescheduling debounced job");
            }
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            tokio::spawn(job);
        }));
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// Whether a timer is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
