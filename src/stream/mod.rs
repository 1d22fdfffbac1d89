// SPDX-License-Identifier: MPL-2.0
//! Adaptive-streaming session management.
//!
//! The session is independent from the player state: it only reports when
//! the manifest is ready (so the controller can autoplay) and when the
//! stream failed for good.

pub mod debounce;
pub mod engine;
pub mod session;

pub use debounce::{Debouncer, StartDebounce};
pub use engine::{
    AdaptiveEngine, EngineConfig, EngineErrorKind, EngineEvent, EngineFactory, Generation,
};
pub use session::{SessionEffect, SessionState, StreamSession};
