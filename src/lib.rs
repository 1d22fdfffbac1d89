// SPDX-License-Identifier: MPL-2.0
//! `scrubline` keeps a custom video-player control surface in sync with a
//! playback element and an adaptive-streaming (HLS) engine.
//!
//! User intent (play/pause, volume, mute, layout) lives in an immutable
//! snapshot store; a binder reconciles it with the element, the scrubber
//! overlays drag-to-seek on the element's time, and a stream session keeps
//! the engine alive across transient network failures.
//!
//! The host owns the element, engine and pointer listeners and drives a
//! [`controller::PlayerController`] with [`controller::Message`]s.

#![doc(html_root_url = "https://docs.rs/scrubline/0.3.0")]

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod player;
pub mod stream;

#[cfg(test)]
mod test_utils;
