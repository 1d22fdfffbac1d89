// SPDX-License-Identifier: MPL-2.0
//! Trailing-edge debounce for session starts.
//!
//! Expressed against explicit [`Instant`]s so the host (or a test) decides
//! when time passes; [`Debouncer::wait`] is the async convenience on top.

use std::time::{Duration, Instant};

use crate::config::{DEFAULT_START_DEBOUNCE_MS, MAX_START_DEBOUNCE_MS, MIN_START_DEBOUNCE_MS};

/// Quiet window before a selected source is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartDebounce(Duration);

impl StartDebounce {
    /// Creates a debounce window, clamping to the configured bounds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(MIN_START_DEBOUNCE_MS, MAX_START_DEBOUNCE_MS),
        ))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for StartDebounce {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_START_DEBOUNCE_MS))
    }
}

/// Holds at most one pending value, released once its deadline passes.
///
/// Scheduling again replaces the value and pushes the deadline back.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Takes the value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(deadline, _)| now >= *deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Sleeps until the deadline and takes the value.
    ///
    /// Returns `None` immediately when nothing is scheduled.
    pub async fn wait(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.pending.take().map(|(_, value)| value)
    }
}
