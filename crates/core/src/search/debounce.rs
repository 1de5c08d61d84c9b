//! # Debounce
//!
//! Rate-limits a stream of raw values: a value is committed only after no
//! newer value arrived for a full quiet period.
//!
//! ```text
//! push("a")   t=0    ── timer(300) ──x  cancelled
//! push("ab")  t=100       ── timer(300) ──x  cancelled
//! push("abc") t=150            ── timer(300) ──▶ commit "abc" at t=450
//! ```
//!
//! Each `push` cancels the pending timer and schedules a new one. Dropping
//! the debouncer (or calling `cancel`) cancels unconditionally, so no
//! committed value is delivered after teardown.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Generic debouncer delivering committed values on a channel
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    quiet_period: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
    // Bumped on every push/cancel; a timer only commits if it still holds the latest value
    generation: Arc<Mutex<u64>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver of committed values
    pub fn new(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet_period,
            tx,
            pending: None,
            generation: Arc::new(Mutex::new(0)),
        };
        (debouncer, rx)
    }

    /// Record a new raw value, restarting the quiet period
    pub fn push(&mut self, value: T) {
        let generation = self.bump_generation();
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let deadline = Instant::now() + self.quiet_period;
        let tx = self.tx.clone();
        let latest = Arc::clone(&self.generation);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let current = latest.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == generation {
                // Receiver gone means the consumer was torn down
                let _ = tx.send(value);
            }
        }));
    }
}

impl<T> Debouncer<T> {
    /// Drop any pending emission
    pub fn cancel(&mut self) {
        self.bump_generation();
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a value is waiting out its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    fn bump_generation(&self) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        *generation
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_only_last_value() {
        let start = Instant::now();
        let (mut debouncer, mut rx) = Debouncer::new(QUIET);

        debouncer.push("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.push("ab");
        tokio::time::advance(Duration::from_millis(50)).await;
        debouncer.push("abc");

        let committed = rx.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert_eq!(committed, "abc");
        assert!(elapsed >= Duration::from_millis(450), "committed early: {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(451), "committed late: {:?}", elapsed);

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_values_each_commit() {
        let (mut debouncer, mut rx) = Debouncer::new(QUIET);

        debouncer.push(1);
        assert!(debouncer.is_pending());
        assert_eq!(rx.recv().await, Some(1));

        debouncer.push(2);
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_emission() {
        let (mut debouncer, mut rx) = Debouncer::new(QUIET);
        debouncer.push("late");
        tokio::time::advance(Duration::from_millis(299)).await;

        drop(debouncer);
        tokio::time::advance(Duration::from_secs(1)).await;

        // Every sender is gone and nothing was delivered
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_then_push_again() {
        let (mut debouncer, mut rx) = Debouncer::new(QUIET);
        debouncer.push("discarded");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());

        debouncer.push("kept");
        assert_eq!(rx.recv().await, Some("kept"));
    }
}
