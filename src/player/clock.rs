// SPDX-License-Identifier: MPL-2.0
//! Playback position and duration as observed from the element.
//!
//! The element is the only time source. Its samples can be NaN before
//! metadata loads or infinite for live streams, so everything is sanitized
//! here before it reaches the store.

/// A sanitized `(current_time, duration)` pair in seconds.
///
/// Invariants: `duration >= 0` and finite; `current_time >= 0` and, once the
/// duration is known, `current_time <= duration`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    current_time: f64,
    duration: f64,
}

impl PlaybackClock {
    /// Builds a clock from raw element samples.
    #[must_use]
    pub fn new(current_time: f64, duration: f64) -> Self {
        let duration = sanitize_duration(duration);
        Self {
            current_time: clamp_time(current_time, duration),
            duration,
        }
    }

    #[must_use]
    pub fn current_time(self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn duration(self) -> f64 {
        self.duration
    }

    /// Position as a fraction of the duration, always in `[0, 1]`.
    ///
    /// Returns 0 while the duration is unknown.
    #[must_use]
    pub fn progress_fraction(self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn elapsed_label(self) -> String {
        format_time(self.current_time)
    }

    #[must_use]
    pub fn duration_label(self) -> String {
        format_time(self.duration)
    }
}

/// Non-finite or negative durations become 0 (unknown).
#[must_use]
pub fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Clamps a time to `[0, duration]`, or to `>= 0` when the duration is unknown.
#[must_use]
pub fn clamp_time(time: f64, duration: f64) -> f64 {
    if !time.is_finite() || time <= 0.0 {
        return 0.0;
    }
    if duration > 0.0 {
        time.min(duration)
    } else {
        time
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past the hour.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
