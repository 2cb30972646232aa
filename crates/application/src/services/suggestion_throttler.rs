//! Trailing-edge throttle for suggestion lookups
//!
//! A small timer-driven scheduler that is independent of any UI toolkit.
//! Callers pass the current [`Instant`] in and ask for the next deadline
//! back, so the owner decides how to wait (a `tokio::select!` arm, a test
//! clock, ...).
//!
//! Semantics, for an interval `I`:
//! - The first call in a quiet period runs immediately and opens a window.
//! - Calls inside an open window are deferred. Only the most recent value
//!   is kept, so at most one trailing call is pending at any time.
//! - When the window closes the pending value runs and opens a new window.

use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Default minimum spacing between two suggestion lookups
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(500);

/// Outcome of submitting a value to the throttler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision<T> {
    /// Run now with this value
    Run(T),
    /// Held back until `due`; a later submit may still replace it
    Deferred {
        /// When the pending value becomes runnable
        due: Instant,
    },
}

/// Leading + trailing edge throttle holding at most one pending value
#[derive(Debug)]
pub struct SuggestionThrottler<T> {
    interval: Duration,
    window_started: Option<Instant>,
    pending: Option<T>,
}

impl<T> SuggestionThrottler<T> {
    /// Create a throttler with the given interval
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_started: None,
            pending: None,
        }
    }

    /// The configured interval
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Submit a value at `now`
    pub fn submit(&mut self, value: T, now: Instant) -> ThrottleDecision<T> {
        match self.window_end() {
            Some(due) if now < due => {
                trace!(?due, replaced = self.pending.is_some(), "Deferring throttled call");
                self.pending = Some(value);
                ThrottleDecision::Deferred { due }
            },
            _ => {
                // A pending value left over from an expired window is superseded.
                self.pending = None;
                self.window_started = Some(now);
                ThrottleDecision::Run(value)
            },
        }
    }

    /// Take the pending value if its window has closed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.next_deadline()?;
        if now < due {
            return None;
        }
        self.window_started = Some(now);
        self.pending.take()
    }

    /// When the pending value becomes runnable, if there is one
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and(self.window_end())
    }

    /// Whether a trailing call is waiting
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without running it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn window_end(&self) -> Option<Instant> {
        self.window_started.map(|start| start + self.interval)
    }
}

impl<T> Default for SuggestionThrottler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}
