//! Managed periodic task
//!
//! A tokio interval loop with an explicit lifetime: it runs from
//! [`PeriodicTask::start`] until [`PeriodicTask::stop`], until the callback
//! returns `false`, or until the handle is dropped.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug)]
pub struct PeriodicTask {
    handle: JoinHandle<()>,
    period: Duration,
}

impl PeriodicTask {
    /// Spawn the loop; the first tick fires immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick() {
                    tracing::debug!("periodic task finished by its callback");
                    break;
                }
            }
        });
        Self { handle, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_period() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let task = PeriodicTask::start(Duration::from_secs(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
        assert!(task.is_running());
        assert_eq!(task.period(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_and_drop_end_the_loop() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let task = PeriodicTask::start(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        tokio::time::sleep(Duration::from_millis(1500)).await;
        task.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(!task.is_running());

        let counter = Arc::clone(&ticks);
        let task = PeriodicTask::start(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        tokio::time::sleep(Duration::from_millis(1)).await;
        drop(task);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_can_finish() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let task = PeriodicTask::start(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst) < 2
        });
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(!task.is_running());
    }
}
