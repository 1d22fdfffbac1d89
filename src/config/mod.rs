// SPDX-License-Identifier: MPL-2.0
//! This module handles the player configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! Every field is optional; missing values fall back to the constants in
//! [`defaults`]. Accessors resolve raw values into the validated types used
//! by the player.
//!
//! # Examples
//!
//! ```no_run
//! use scrubline::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.scrub_throttle_ms = Some(30);
//! config::save(&config).expect("Failed to save config");
//!
//! assert_eq!(config.scrub_throttle().as_duration().as_millis(), 30);
//! ```

mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::error::Result;
use crate::player::{ScrubThrottle, Volume};
use crate::stream::{EngineConfig, StartDebounce};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Scrubline";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub muted: Option<bool>,
    #[serde(default)]
    pub autoplay_on_ready: Option<bool>,
    #[serde(default)]
    pub scrub_throttle_ms: Option<u64>,
    #[serde(default)]
    pub start_debounce_ms: Option<u64>,
    #[serde(default)]
    pub live_sync_duration_count: Option<u32>,
    #[serde(default)]
    pub live_max_latency_duration_count: Option<u32>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            muted: Some(DEFAULT_MUTED),
            autoplay_on_ready: Some(DEFAULT_AUTOPLAY_ON_READY),
            scrub_throttle_ms: Some(DEFAULT_SCRUB_THROTTLE_MS),
            start_debounce_ms: Some(DEFAULT_START_DEBOUNCE_MS),
            live_sync_duration_count: Some(DEFAULT_LIVE_SYNC_DURATION_COUNT),
            live_max_latency_duration_count: Some(DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Initial volume for a freshly mounted player.
    #[must_use]
    pub fn initial_volume(&self) -> Volume {
        self.volume.map(Volume::new).unwrap_or_default()
    }

    /// Whether a freshly mounted player starts muted.
    #[must_use]
    pub fn initial_muted(&self) -> bool {
        self.muted.unwrap_or(DEFAULT_MUTED)
    }

    #[must_use]
    pub fn autoplay_on_ready(&self) -> bool {
        self.autoplay_on_ready.unwrap_or(DEFAULT_AUTOPLAY_ON_READY)
    }

    #[must_use]
    pub fn scrub_throttle(&self) -> ScrubThrottle {
        self.scrub_throttle_ms
            .map(ScrubThrottle::from_millis)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn start_debounce(&self) -> StartDebounce {
        self.start_debounce_ms
            .map(StartDebounce::from_millis)
            .unwrap_or_default()
    }

    /// Engine construction settings for live latency control.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            live_sync_duration_count: self
                .live_sync_duration_count
                .unwrap_or(DEFAULT_LIVE_SYNC_DURATION_COUNT),
            live_max_latency_duration_count: self
                .live_max_latency_duration_count
                .unwrap_or(DEFAULT_LIVE_MAX_LATENCY_DURATION_COUNT),
        }
    }

    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        self.diagnostics_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
