// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Initial volume, bounds and icon tier threshold
//! - **Scrubbing**: Pointer-move rate limit during drag-to-seek
//! - **Streaming**: Start debounce and live latency engine settings
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume at or above which the "high" volume icon is shown.
pub const HIGH_VOLUME_THRESHOLD: f32 = 0.5;

/// Players start muted so that autoplay-on-ready is permitted by the runtime.
pub const DEFAULT_MUTED: bool = true;

/// Start playback as soon as the manifest has been parsed.
pub const DEFAULT_AUTOPLAY_ON_READY: bool = true;

// ==========================================================================
// Scrubbing Defaults
// ==========================================================================

/// Default minimum interval between two evaluated pointer-move samples.
pub const DEFAULT_SCRUB_THROTTLE_MS: u64 = 60;

/// Minimum scrub throttle (0 = evaluate every sample).
pub const MIN_SCRUB_THROTTLE_MS: u64 = 0;

/// Maximum scrub throttle.
pub const MAX_SCRUB_THROTTLE_MS: u64 = 1_000;

// ==========================================================================
// Streaming Defaults
// ==========================================================================

/// Default quiet window collapsing rapid source selections into one attach.
pub const DEFAULT_START_DEBOUNCE_MS: u64 = 500;

/// Minimum start debounce.
pub const MIN_START_DEBOUNCE_MS: u64 = 0;

/// Maximum start debounce.
pub const MAX_START_DEBOUNCE_MS: u64 = 10_000;

/// Number of segments from the live edge the engine syncs to.
pub const DEFAULT_LIVE_SYNC_DURATION_COUNT: u32 = 0;

/// Maximum latency, in segments, before the engine jumps back to the live edge.
pub const DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT: u32 = 1;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1_000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Volume validation
    assert!(MIN_VOLUME >= 0.0);
    assert!(MAX_VOLUME > MIN_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(HIGH_VOLUME_THRESHOLD > MIN_VOLUME);
    assert!(HIGH_VOLUME_THRESHOLD <= MAX_VOLUME);

    // Scrub throttle validation
    assert!(DEFAULT_SCRUB_THROTTLE_MS <= MAX_SCRUB_THROTTLE_MS);

    // Start debounce validation
    assert!(DEFAULT_START_DEBOUNCE_MS <= MAX_START_DEBOUNCE_MS);

    // Live latency validation
    assert!(DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT > DEFAULT_LIVE_SYNC_DURATION_COUNT);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
