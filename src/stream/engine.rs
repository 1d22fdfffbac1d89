// SPDX-License-Identifier: MPL-2.0
//! Contract of the adaptive-streaming engine.
//!
//! The engine itself (manifest fetching, buffering, ABR) is opaque. The
//! session only drives its lifecycle: create, attach to the element, load a
//! source, destroy. Every engine instance is created with a [`Generation`];
//! the host tags the engine's callbacks with it so events from a destroyed
//! instance can be told apart from the live one.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT, DEFAULT_LIVE_SYNC_DURATION_COUNT};
use crate::error::StreamError;

/// Construction settings handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Segments behind the live edge the engine syncs to.
    pub live_sync_duration_count: u32,
    /// Segments of latency tolerated before jumping back to the live edge.
    pub live_max_latency_duration_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            live_sync_duration_count: DEFAULT_LIVE_SYNC_DURATION_COUNT,
            live_max_latency_duration_count: DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT,
        }
    }
}

/// Identifies one engine instance within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Engine error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    Network,
    Media,
    KeySystem,
    Mux,
    Other,
}

impl EngineErrorKind {
    #[must_use]
    pub fn into_error(self, details: impl Into<String>) -> StreamError {
        let details = details.into();
        match self {
            EngineErrorKind::Network => StreamError::Network(details),
            EngineErrorKind::Media => StreamError::Media(details),
            EngineErrorKind::KeySystem => StreamError::KeySystem(details),
            EngineErrorKind::Mux => StreamError::Mux(details),
            EngineErrorKind::Other => StreamError::Other(details),
        }
    }
}

/// Lifecycle notifications from an engine instance.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MediaAttached,
    ManifestParsed,
    Error {
        kind: EngineErrorKind,
        details: String,
    },
}

/// One live engine instance.
pub trait AdaptiveEngine {
    /// Binds the engine to the playback element. Completion is reported
    /// with [`EngineEvent::MediaAttached`].
    fn attach_media(&mut self);

    /// Starts loading the manifest at `url`.
    fn load_source(&mut self, url: &str);

    /// Releases every resource held by the instance. Called exactly once.
    fn destroy(&mut self);
}

/// Creates engine instances and reports whether the runtime supports them.
pub trait EngineFactory {
    type Engine: AdaptiveEngine;

    fn is_supported(&self) -> bool;

    fn create(&mut self, config: &EngineConfig, generation: Generation) -> Self::Engine;
}
