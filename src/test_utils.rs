// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and in-memory collaborators.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.
//! It also provides fakes for the element, engine and pointer-capture seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future;
use futures_util::FutureExt;

use crate::error::ElementError;
use crate::player::{
    CommandFuture, ElementCommand, ListenerRegistration, MediaElement, PointerCapture,
};
use crate::stream::{AdaptiveEngine, EngineConfig, EngineFactory, Generation};

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

/// Default epsilon for f64 comparisons.
/// Suitable for values that should be "exactly equal" but may have minor floating-point errors.
pub const F64_EPSILON: f64 = 1e-10;

// ═══════════════════════════════════════════════════════════════════════════
// ELEMENT
// ═══════════════════════════════════════════════════════════════════════════

/// In-memory playback element.
///
/// Commands settle immediately: a rejected `play()` leaves the element
/// paused, as a real element does once the rejection lands.
#[derive(Debug)]
pub struct FakeElement {
    volume: f32,
    muted: bool,
    paused: bool,
    current_time: f64,
    duration: f64,
    source: Option<String>,
    play_rejection: Option<ElementError>,
    pip_rejection: Option<ElementError>,
    play_calls: usize,
    pause_calls: usize,
    pip_requests: usize,
    commands: Vec<ElementCommand>,
}

impl Default for FakeElement {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            source: None,
            play_rejection: None,
            pip_rejection: None,
            play_calls: 0,
            pause_calls: 0,
            pip_requests: 0,
            commands: Vec::new(),
        }
    }
}

impl FakeElement {
    pub fn reject_play_with(&mut self, err: ElementError) {
        self.play_rejection = Some(err);
    }

    pub fn allow_play(&mut self) {
        self.play_rejection = None;
    }

    pub fn reject_picture_in_picture_with(&mut self, err: ElementError) {
        self.pip_rejection = Some(err);
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls
    }

    pub fn picture_in_picture_requests(&self) -> usize {
        self.pip_requests
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Every write received so far, in order.
    pub fn commands(&self) -> Vec<ElementCommand> {
        self.commands.clone()
    }

    fn settle(rejection: Option<ElementError>) -> CommandFuture {
        match rejection {
            Some(err) => future::ready(Err(err)).boxed(),
            None => future::ready(Ok(())).boxed(),
        }
    }
}

impl MediaElement for FakeElement {
    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.commands.push(ElementCommand::SetVolume(volume));
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.commands.push(ElementCommand::SetMuted(muted));
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
        self.commands.push(ElementCommand::Seek(time));
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn play(&mut self) -> CommandFuture {
        self.play_calls += 1;
        self.commands.push(ElementCommand::Play);
        if self.play_rejection.is_none() {
            self.paused = false;
        }
        Self::settle(self.play_rejection.clone())
    }

    fn pause(&mut self) -> CommandFuture {
        self.pause_calls += 1;
        self.commands.push(ElementCommand::Pause);
        self.paused = true;
        Self::settle(None)
    }

    fn request_picture_in_picture(&mut self) -> CommandFuture {
        self.pip_requests += 1;
        Self::settle(self.pip_rejection.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ENGINE
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct EngineRecord {
    configs: Vec<EngineConfig>,
    attach_calls: usize,
    loaded_sources: Vec<String>,
    destroyed: usize,
}

/// Shared view of everything fake engines did.
#[derive(Debug, Clone, Default)]
pub struct EngineLog(Arc<Mutex<EngineRecord>>);

impl EngineLog {
    fn lock(&self) -> MutexGuard<'_, EngineRecord> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn created(&self) -> usize {
        self.lock().configs.len()
    }

    pub fn configs(&self) -> Vec<EngineConfig> {
        self.lock().configs.clone()
    }

    pub fn attach_calls(&self) -> usize {
        self.lock().attach_calls
    }

    pub fn loaded_sources(&self) -> Vec<String> {
        self.lock().loaded_sources.clone()
    }

    pub fn destroyed(&self) -> usize {
        self.lock().destroyed
    }
}

#[derive(Debug)]
pub struct FakeEngine {
    log: EngineLog,
    destroyed: bool,
}

impl AdaptiveEngine for FakeEngine {
    fn attach_media(&mut self) {
        self.log.lock().attach_calls += 1;
    }

    fn load_source(&mut self, url: &str) {
        self.log.lock().loaded_sources.push(url.to_string());
    }

    fn destroy(&mut self) {
        assert!(!self.destroyed, "engine destroyed twice");
        self.destroyed = true;
        self.log.lock().destroyed += 1;
    }
}

#[derive(Debug, Clone)]
pub struct FakeEngineFactory {
    supported: bool,
    log: EngineLog,
}

impl Default for FakeEngineFactory {
    fn default() -> Self {
        Self {
            supported: true,
            log: EngineLog::default(),
        }
    }
}

impl FakeEngineFactory {
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }

    pub fn log(&self) -> EngineLog {
        self.log.clone()
    }
}

impl EngineFactory for FakeEngineFactory {
    type Engine = FakeEngine;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&mut self, config: &EngineConfig, _generation: Generation) -> FakeEngine {
        self.log.lock().configs.push(*config);
        FakeEngine {
            log: self.log.clone(),
            destroyed: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// POINTER CAPTURE
// ═══════════════════════════════════════════════════════════════════════════

/// Counts listener attach/detach cycles.
#[derive(Debug, Clone, Default)]
pub struct RecordingCapture {
    captured: Arc<AtomicUsize>,
    detached: Arc<AtomicUsize>,
}

impl RecordingCapture {
    pub fn captured(&self) -> usize {
        self.captured.load(Ordering::SeqCst)
    }

    pub fn detached(&self) -> usize {
        self.detached.load(Ordering::SeqCst)
    }

    /// Registrations currently attached.
    pub fn active(&self) -> usize {
        self.captured() - self.detached()
    }
}

impl PointerCapture for RecordingCapture {
    fn capture(&mut self) -> ListenerRegistration {
        self.captured.fetch_add(1, Ordering::SeqCst);
        let detached = Arc::clone(&self.detached);
        ListenerRegistration::new(move || {
            detached.fetch_add(1, Ordering::SeqCst);
        })
    }
}
