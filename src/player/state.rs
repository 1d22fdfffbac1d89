// SPDX-License-Identifier: MPL-2.0
//! Player state snapshot and the transitions that produce new snapshots.
//!
//! A [`PlaybackState`] is never mutated in place. Every change is a
//! [`Transition`] whose [`Transition::apply`] is a pure function from the
//! previous snapshot to the next one. Transitions never touch the element;
//! pushing state to the element is the binder's job.
//!
//! The drag-to-seek gesture is modeled here:
//! - `BeginScrub` snapshots the play intent and forces it off
//! - `UpdateScrub` only retargets the pending seek
//! - `EndScrub` restores the intent captured at `BeginScrub`

use super::clock::{clamp_time, sanitize_duration, PlaybackClock};
use super::volume::Volume;

/// Presentation mode derived from the independent theater/fullscreen flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Normal,
    Theater,
    Fullscreen,
}

/// Immutable snapshot of everything the player knows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    volume: Volume,
    is_muted: bool,
    is_scrubbing: bool,
    is_play_intent: bool,
    was_playing_before_scrub: bool,
    pending_seek: Option<f64>,
    clock: PlaybackClock,
    is_theater: bool,
    is_fullscreen: bool,
    is_mini_mode: bool,
}

impl PlaybackState {
    /// Initial snapshot at mount: paused, normal layout, duration unknown.
    #[must_use]
    pub fn new(volume: Volume, is_muted: bool) -> Self {
        Self {
            volume,
            is_muted,
            is_scrubbing: false,
            is_play_intent: false,
            was_playing_before_scrub: false,
            pending_seek: None,
            clock: PlaybackClock::default(),
            is_theater: false,
            is_fullscreen: false,
            is_mini_mode: false,
        }
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        self.is_scrubbing
    }

    /// Whether the user (or autoplay) wants playback running.
    #[must_use]
    pub fn is_play_intent(&self) -> bool {
        self.is_play_intent
    }

    #[must_use]
    pub fn was_playing_before_scrub(&self) -> bool {
        self.was_playing_before_scrub
    }

    /// Seek target not yet written to the element.
    #[must_use]
    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    #[must_use]
    pub fn clock(&self) -> PlaybackClock {
        self.clock
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.clock.duration()
    }

    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        self.clock.progress_fraction()
    }

    #[must_use]
    pub fn is_theater(&self) -> bool {
        self.is_theater
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn is_mini_mode(&self) -> bool {
        self.is_mini_mode
    }

    /// Effective layout; fullscreen overrides theater.
    #[must_use]
    pub fn layout(&self) -> Layout {
        if self.is_fullscreen {
            Layout::Fullscreen
        } else if self.is_theater {
            Layout::Theater
        } else {
            Layout::Normal
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Volume::default(), crate::config::DEFAULT_MUTED)
    }
}

/// A tagged state change. See [`Transition::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    TogglePlay,
    SetPlayIntent(bool),
    SetVolume(f32),
    ToggleMute,
    BeginScrub(f64),
    UpdateScrub(f64),
    EndScrub,
    ObserveTime { current_time: f64, duration: f64 },
    ObserveMetadataLoaded { duration: f64 },
    SeekApplied,
    ToggleTheater,
    ToggleFullscreen,
    ObserveMiniMode(bool),
}

impl Transition {
    /// Produces the next snapshot from `state`. Pure.
    #[must_use]
    pub fn apply(&self, state: &PlaybackState) -> PlaybackState {
        let mut next = state.clone();
        match *self {
            Transition::TogglePlay => {
                // Mid-gesture the shown intent is paused, so the toggle
                // means play once the gesture ends.
                if next.is_scrubbing {
                    next.was_playing_before_scrub = !next.is_play_intent;
                } else {
                    next.is_play_intent = !next.is_play_intent;
                }
            }
            Transition::SetPlayIntent(playing) => {
                if next.is_scrubbing {
                    next.was_playing_before_scrub = playing;
                } else {
                    next.is_play_intent = playing;
                }
            }
            Transition::SetVolume(volume) => {
                next.volume = Volume::new(volume);
            }
            Transition::ToggleMute => {
                next.is_muted = !next.is_muted;
            }
            Transition::BeginScrub(time) => {
                if !next.is_scrubbing {
                    next.is_scrubbing = true;
                    next.was_playing_before_scrub = next.is_play_intent;
                    next.is_play_intent = false;
                }
                next.retarget(time);
            }
            Transition::UpdateScrub(time) => {
                if next.is_scrubbing {
                    next.retarget(time);
                }
            }
            Transition::EndScrub => {
                if next.is_scrubbing {
                    next.is_scrubbing = false;
                    next.is_play_intent = next.was_playing_before_scrub;
                }
            }
            Transition::ObserveTime {
                current_time,
                duration,
            } => {
                if !next.is_scrubbing {
                    next.clock = PlaybackClock::new(current_time, duration);
                }
            }
            Transition::ObserveMetadataLoaded { duration } => {
                next.clock = PlaybackClock::new(next.clock.current_time(), duration);
            }
            Transition::SeekApplied => {
                next.pending_seek = None;
            }
            Transition::ToggleTheater => {
                next.is_theater = !next.is_theater;
            }
            Transition::ToggleFullscreen => {
                next.is_fullscreen = !next.is_fullscreen;
            }
            Transition::ObserveMiniMode(active) => {
                next.is_mini_mode = active;
            }
        }
        next
    }
}

impl PlaybackState {
    /// Points the pending seek and the displayed time at `time`.
    fn retarget(&mut self, time: f64) {
        let duration = sanitize_duration(self.clock.duration());
        let target = clamp_time(time, duration);
        self.pending_seek = Some(target);
        self.clock = PlaybackClock::new(target, duration);
    }
}
