// SPDX-License-Identifier: MPL-2.0
//! Adaptive-stream session lifecycle for one source URL.
//!
//! ```text
//! Idle ──start──▶ (debounce) ──▶ Attaching ──MediaAttached──▶ ManifestLoading
//!                     │                ▲                            │
//!                     ▼                │ (debounced restart)   ManifestParsed
//!                   Direct        Error(Network)                    ▼
//!                (unsupported)                                    Ready
//! ```
//!
//! A network error destroys the engine and schedules a restart through the
//! same debounce; any other error destroys the engine and stays in
//! `Error(kind)` until a new source is selected or the session is torn down.

use std::time::Instant;

use super::debounce::{Debouncer, StartDebounce};
use super::engine::{AdaptiveEngine, EngineConfig, EngineEvent, EngineFactory, Generation};
use crate::diagnostics::{DiagnosticsHandle, StreamEvent};
use crate::error::StreamError;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Attaching,
    ManifestLoading,
    Ready,
    /// No engine support; the element plays the URL itself.
    Direct,
    Error(StreamError),
}

impl SessionState {
    /// The error that ended the session, if it will not recover on its own.
    #[must_use]
    pub fn fatal_error(&self) -> Option<&StreamError> {
        match self {
            SessionState::Error(err) if !err.is_transient() => Some(err),
            _ => None,
        }
    }
}

/// What the caller has to act on after driving the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    None,
    /// Manifest parsed; playback may start.
    Ready,
    /// Hand this URL straight to the element.
    DirectSource(String),
    /// Non-recoverable engine failure.
    Failed(StreamError),
}

/// Owns at most one engine instance and the debounced start.
pub struct StreamSession<F: EngineFactory> {
    factory: F,
    config: EngineConfig,
    start: Debouncer<String>,
    engine: Option<F::Engine>,
    source: Option<String>,
    state: SessionState,
    retry_count: u32,
    generation: Generation,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<F: EngineFactory> StreamSession<F> {
    #[must_use]
    pub fn new(factory: F, config: EngineConfig, debounce: StartDebounce) -> Self {
        Self {
            factory,
            config,
            start: Debouncer::new(debounce.as_duration()),
            engine: None,
            source: None,
            state: SessionState::Idle,
            retry_count: 0,
            generation: Generation::default(),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: Option<DiagnosticsHandle>) -> Self {
        self.diagnostics = handle;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The selected source URL.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Network recoveries performed for the current source.
    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Generation of the most recently created engine.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// When the pending start (or restart) fires, if one is scheduled.
    #[must_use]
    pub fn start_deadline(&self) -> Option<Instant> {
        self.start.deadline()
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Selects `url` as the source; the engine attaches once the debounce
    /// window passes without another selection.
    pub fn start(&mut self, url: impl Into<String>, now: Instant) {
        let url = url.into();
        let is_active = self.source.as_deref() == Some(url.as_str());
        if is_active && self.state.fatal_error().is_none() {
            tracing::trace!(%url, "source already active");
            return;
        }

        if self.source.is_some() || self.engine.is_some() {
            self.teardown();
        }
        tracing::debug!(%url, "source selected");
        self.source = Some(url.clone());
        self.retry_count = 0;
        self.start.schedule(url, now);
    }

    /// Fires the debounced start if it is due.
    pub fn poll(&mut self, now: Instant) -> SessionEffect {
        match self.start.poll(now) {
            Some(url) => self.launch(url),
            None => SessionEffect::None,
        }
    }

    /// Sleeps until the pending start is due, then fires it.
    pub async fn wait_for_start(&mut self) -> SessionEffect {
        match self.start.wait().await {
            Some(url) => self.launch(url),
            None => SessionEffect::None,
        }
    }

    /// Applies an engine notification. Events from any engine other than the
    /// live one are ignored.
    pub fn handle_engine_event(
        &mut self,
        generation: Generation,
        event: EngineEvent,
        now: Instant,
    ) -> SessionEffect {
        if generation != self.generation || self.engine.is_none() {
            tracing::trace!(
                stale = generation.value(),
                live = self.generation.value(),
                "ignoring stale engine event"
            );
            return SessionEffect::None;
        }

        match event {
            EngineEvent::MediaAttached => {
                if let (Some(engine), Some(url)) = (self.engine.as_mut(), self.source.as_deref()) {
                    engine.load_source(url);
                    self.state = SessionState::ManifestLoading;
                }
                SessionEffect::None
            }
            EngineEvent::ManifestParsed => {
                self.state = SessionState::Ready;
                self.log(StreamEvent::Ready);
                SessionEffect::Ready
            }
            EngineEvent::Error { kind, details } => {
                let err = kind.into_error(details);
                self.destroy_engine();

                if err.is_transient() {
                    self.retry_count += 1;
                    tracing::warn!(attempt = self.retry_count, error = %err, "restarting stream engine");
                    self.log(StreamEvent::NetworkRecovery {
                        attempt: self.retry_count,
                    });
                    if let Some(url) = self.source.clone() {
                        self.start.schedule(url, now);
                    }
                    self.state = SessionState::Error(err);
                    SessionEffect::None
                } else {
                    tracing::error!(error = %err, "stream engine failed");
                    self.log(StreamEvent::Failed {
                        kind: err.kind_key().to_string(),
                    });
                    if let Some(diagnostics) = &self.diagnostics {
                        diagnostics.log_error(err.to_string());
                    }
                    self.state = SessionState::Error(err.clone());
                    SessionEffect::Failed(err)
                }
            }
        }
    }

    /// Cancels any pending start and destroys the engine.
    pub fn teardown(&mut self) {
        let was_active = self.source.is_some() || self.engine.is_some() || self.start.is_pending();
        self.start.cancel();
        self.destroy_engine();
        self.source = None;
        self.retry_count = 0;
        self.state = SessionState::Idle;
        if was_active {
            self.log(StreamEvent::TornDown);
        }
    }

    fn launch(&mut self, url: String) -> SessionEffect {
        if !self.factory.is_supported() {
            tracing::debug!(%url, "adaptive engine unsupported, using element directly");
            self.destroy_engine();
            self.state = SessionState::Direct;
            self.log(StreamEvent::DirectFallback);
            return SessionEffect::DirectSource(url);
        }

        self.destroy_engine();
        self.generation = self.generation.next();
        let mut engine = self.factory.create(&self.config, self.generation);
        engine.attach_media();
        self.engine = Some(engine);
        self.state = SessionState::Attaching;
        tracing::debug!(
            %url,
            generation = self.generation.value(),
            retry_count = self.retry_count,
            "attaching stream engine"
        );
        self.log(StreamEvent::Attaching {
            retry_count: self.retry_count,
        });
        SessionEffect::None
    }

    fn destroy_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
    }

    fn log(&self, event: StreamEvent) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_stream(event);
        }
    }
}

impl<F: EngineFactory> Drop for StreamSession<F> {
    fn drop(&mut self) {
        self.start.cancel();
        self.destroy_engine();
    }
}

impl<F: EngineFactory> std::fmt::Debug for StreamSession<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("state", &self.state)
            .field("source", &self.source)
            .field("retry_count", &self.retry_count)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
