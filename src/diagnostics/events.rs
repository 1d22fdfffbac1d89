// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for player activity tracking.
//!
//! This module defines the events captured while the player is in use:
//! what the user did, how the stream session moved through its lifecycle,
//! and which recoverable or fatal problems occurred along the way.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    // ==========================================================================
    // Playback Actions
    // ==========================================================================
    /// Toggle play/pause intent.
    TogglePlayback,

    /// Start a drag-to-seek gesture.
    BeginScrub {
        /// Target position in seconds.
        position_secs: f64,
    },

    /// Release a drag-to-seek gesture.
    EndScrub,

    // ==========================================================================
    // Audio Actions
    // ==========================================================================
    /// Change volume level.
    SetVolume {
        /// Volume level (0.0 to 1.0).
        volume: f32,
    },

    /// Toggle mute state.
    ToggleMute,

    // ==========================================================================
    // Presentation Actions
    // ==========================================================================
    /// Toggle theater mode.
    ToggleTheater,

    /// Toggle fullscreen mode.
    ToggleFullscreen,

    /// Ask the element to enter picture-in-picture.
    RequestPictureInPicture,

    // ==========================================================================
    // Source Actions
    // ==========================================================================
    /// Select a new stream source.
    SelectSource,
}

/// Stream session lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A new engine instance was created and is attaching to the element.
    Attaching {
        /// Number of network recoveries performed for the current source.
        retry_count: u32,
    },

    /// The engine was not supported; the source is played directly.
    DirectFallback,

    /// The manifest was parsed and playback may start.
    Ready,

    /// A transient network error was recovered by restarting the engine.
    NetworkRecovery {
        /// Recovery attempt number, starting at 1.
        attempt: u32,
    },

    /// A non-recoverable engine error ended the session.
    Failed {
        /// Error category (see `StreamError::kind_key`).
        kind: String,
    },

    /// The session was torn down (source change or unmount).
    TornDown,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        /// The specific action performed.
        action: PlayerAction,
        /// Optional additional details.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Stream session lifecycle change.
    Stream {
        /// The lifecycle event.
        event: StreamEvent,
    },

    /// Non-critical warning.
    Warning {
        /// Brief description of the warning
        message: String,
    },

    /// Critical error.
    Error {
        /// Brief description of the error
        message: String,
    },
}
