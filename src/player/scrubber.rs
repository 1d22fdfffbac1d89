// SPDX-License-Identifier: MPL-2.0
//! Drag-to-seek gesture on the progress track.
//!
//! A gesture runs from pointer-down on the track to pointer-up anywhere.
//! While it is active, global pointer listeners are held through a
//! [`ListenerRegistration`] so a drag that leaves the track still ends on
//! release. Pointer moves are rate-limited by [`ScrubThrottle`]; the last
//! dropped sample is flushed before the gesture ends so the final position
//! is never lost.

use std::fmt;
use std::time::{Duration, Instant};

use super::state::Transition;
use super::store::PlaybackStateStore;
use crate::config::{DEFAULT_SCRUB_THROTTLE_MS, MAX_SCRUB_THROTTLE_MS, MIN_SCRUB_THROTTLE_MS};

/// Horizontal extent of the progress track, in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `pointer_x` along the track, clamped to `[0, 1]`.
    ///
    /// A collapsed or non-finite track always yields 0.
    #[must_use]
    pub fn percent_at(&self, pointer_x: f64) -> f64 {
        if !self.left.is_finite()
            || !self.width.is_finite()
            || self.width <= 0.0
            || !pointer_x.is_finite()
        {
            return 0.0;
        }
        (pointer_x - self.left).clamp(0.0, self.width) / self.width
    }
}

/// Minimum interval between two evaluated pointer-move samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubThrottle(Duration);

impl ScrubThrottle {
    /// Creates a throttle, clamping to the configured bounds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(MIN_SCRUB_THROTTLE_MS, MAX_SCRUB_THROTTLE_MS),
        ))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for ScrubThrottle {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_SCRUB_THROTTLE_MS))
    }
}

/// Scoped ownership of global pointer listeners.
///
/// Dropping the registration detaches the listeners.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerRegistration {
    #[must_use]
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detaches now instead of at drop.
    pub fn detach(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Source of global pointer-move / pointer-up listeners.
pub trait PointerCapture {
    /// Attaches the listeners; they stay attached until the registration drops.
    fn capture(&mut self) -> ListenerRegistration;
}

/// Drives the drag-to-seek gesture against the store.
#[derive(Debug)]
pub struct ScrubberController {
    throttle: ScrubThrottle,
    last_evaluated: Option<Instant>,
    trailing_target: Option<f64>,
    registration: Option<ListenerRegistration>,
}

impl ScrubberController {
    #[must_use]
    pub fn new(throttle: ScrubThrottle) -> Self {
        Self {
            throttle,
            last_evaluated: None,
            trailing_target: None,
            registration: None,
        }
    }

    #[must_use]
    pub fn throttle(&self) -> ScrubThrottle {
        self.throttle
    }

    /// Whether global listeners are currently held.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.registration.is_some()
    }

    /// When a dropped sample becomes eligible for [`Self::poll`].
    #[must_use]
    pub fn flush_deadline(&self) -> Option<Instant> {
        self.trailing_target?;
        self.last_evaluated.map(|last| last + self.throttle.as_duration())
    }

    /// Starts (or retargets) a gesture. Returns true if the store changed.
    pub fn pointer_down<C>(
        &mut self,
        store: &mut PlaybackStateStore,
        capture: &mut C,
        pointer_x: f64,
        track: Option<TrackRect>,
    ) -> bool
    where
        C: PointerCapture + ?Sized,
    {
        let Some(track) = track else {
            return false;
        };
        let target = track.percent_at(pointer_x) * store.state().duration();
        store.dispatch(Transition::BeginScrub(target));

        if self.registration.is_none() {
            self.registration = Some(capture.capture());
        }
        self.last_evaluated = None;
        self.trailing_target = None;
        true
    }

    /// Rate-limited retarget while a gesture is active.
    pub fn pointer_move(
        &mut self,
        store: &mut PlaybackStateStore,
        pointer_x: f64,
        track: Option<TrackRect>,
        now: Instant,
    ) -> bool {
        if !store.state().is_scrubbing() {
            return false;
        }
        let Some(track) = track else {
            return false;
        };
        let target = track.percent_at(pointer_x) * store.state().duration();

        if self.is_throttled(now) {
            self.trailing_target = Some(target);
            return false;
        }
        self.evaluate(store, target, now);
        true
    }

    /// Flushes a dropped sample once the throttle window has elapsed.
    pub fn poll(&mut self, store: &mut PlaybackStateStore, now: Instant) -> bool {
        if self.trailing_target.is_none() || self.is_throttled(now) {
            return false;
        }
        match self.trailing_target.take() {
            Some(target) if store.state().is_scrubbing() => {
                self.evaluate(store, target, now);
                true
            }
            _ => false,
        }
    }

    /// Ends the gesture, restoring the play intent captured at pointer-down.
    pub fn pointer_up(&mut self, store: &mut PlaybackStateStore) -> bool {
        let was_scrubbing = store.state().is_scrubbing();
        if was_scrubbing {
            if let Some(target) = self.trailing_target.take() {
                store.dispatch(Transition::UpdateScrub(target));
            }
            store.dispatch(Transition::EndScrub);
        }
        self.release();
        was_scrubbing
    }

    /// Drops listeners and throttle state without touching the store.
    pub fn release(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.detach();
        }
        self.last_evaluated = None;
        self.trailing_target = None;
    }

    fn is_throttled(&self, now: Instant) -> bool {
        self.last_evaluated
            .is_some_and(|last| now.saturating_duration_since(last) < self.throttle.as_duration())
    }

    fn evaluate(&mut self, store: &mut PlaybackStateStore, target: f64, now: Instant) {
        store.dispatch(Transition::UpdateScrub(target));
        self.last_evaluated = Some(now);
        self.trailing_target = None;
    }
}

impl Default for ScrubberController {
    fn default() -> Self {
        Self::new(ScrubThrottle::default())
    }
}
