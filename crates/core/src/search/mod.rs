//! # Search Input
//!
//! Debounced free-text search: raw keystrokes in, committed queries out.

pub mod debounce;

pub use debounce::Debouncer;

use std::time::Duration;
use tokio::sync::mpsc;

/// Quiet period before a typed query is committed
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Search box state: the latest raw text and its debouncer
///
/// Committed queries arrive on the receiver returned by [`SearchInput::new`].
/// Dropping the input cancels any pending commit.
pub struct SearchInput {
    raw: String,
    debouncer: Debouncer<String>,
}

impl SearchInput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::with_quiet_period(DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (debouncer, rx) = Debouncer::new(quiet_period);
        let input = Self {
            raw: String::new(),
            debouncer,
        };
        (input, rx)
    }

    /// Feed the current raw text. Unchanged text does not restart the timer.
    pub fn on_input(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        if raw == self.raw {
            return;
        }
        self.raw = raw.clone();
        tracing::trace!(raw = %raw, "Search input changed");
        self.debouncer.push(raw);
    }

    /// Text as last typed, committed or not
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Tear down without committing the pending query
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
