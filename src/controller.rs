// SPDX-License-Identifier: MPL-2.0
//! Player controller - routes host messages to the player components.
//!
//! The controller owns the store, the scrubber, the stream session and the
//! playback element. Every message that changes the store is followed by a
//! reconciliation so the element always reflects the latest snapshot:
//!
//! ```text
//! Message → store (pure transition) → MediaBinder → element
//! element event → MediaBinder → store
//! engine event → StreamSession → (autoplay / failure)
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::diagnostics::{DiagnosticsHandle, PlayerAction};
use crate::error::StreamError;
use crate::player::{
    ControlSurface, ElementEvent, LayoutController, MediaBinder, MediaElement, PendingCommand,
    PlaybackState, PlaybackStateStore, PointerCapture, ScrubberController, TrackRect,
    Transition,
};
use crate::stream::{EngineEvent, EngineFactory, Generation, SessionEffect, StreamSession};

/// Messages the host feeds into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ═══════════════════════════════════════════════════════════════════════
    // PLAYBACK
    // ═══════════════════════════════════════════════════════════════════════
    /// Toggle play/pause intent.
    TogglePlayback,
    /// Set volume level (clamped to 0.0–1.0).
    SetVolume(f32),
    /// Toggle mute.
    ToggleMute,

    // ═══════════════════════════════════════════════════════════════════════
    // SCRUBBING
    // ═══════════════════════════════════════════════════════════════════════
    /// Progress track geometry; `None` while the track is not mounted.
    SetTrack(Option<TrackRect>),
    /// Pointer pressed on the progress track.
    PointerDown { pointer_x: f64 },
    /// Global pointer move (only meaningful during a gesture).
    PointerMove { pointer_x: f64 },
    /// Global pointer release.
    PointerUp,

    // ═══════════════════════════════════════════════════════════════════════
    // LAYOUT
    // ═══════════════════════════════════════════════════════════════════════
    ToggleTheater,
    ToggleFullscreen,
    RequestPictureInPicture,

    // ═══════════════════════════════════════════════════════════════════════
    // SOURCES AND EVENTS
    // ═══════════════════════════════════════════════════════════════════════
    /// Select a stream URL.
    SelectSource(String),
    /// Notification from the playback element.
    Element(ElementEvent),
    /// Notification from an engine instance, tagged with its generation.
    Engine {
        generation: Generation,
        event: EngineEvent,
    },
    /// Timer tick: flushes throttled scrub samples and due stream starts.
    Tick,
}

/// What the host has to do after a message.
#[derive(Debug)]
pub enum Effect {
    /// No effect.
    None,
    /// Element commands are settling; drive these futures to completion.
    Pending(Vec<PendingCommand>),
    /// The stream failed and will not recover without a new source.
    StreamFailed(StreamError),
}

/// Composition root of the player.
pub struct PlayerController<E, F, C>
where
    E: MediaElement,
    F: EngineFactory,
    C: PointerCapture,
{
    store: PlaybackStateStore,
    binder: MediaBinder,
    scrubber: ScrubberController,
    layout: LayoutController,
    session: StreamSession<F>,
    capture: C,
    track: Option<TrackRect>,
    autoplay_on_ready: bool,
    diagnostics: Option<DiagnosticsHandle>,
    // Declared last so it is dropped after the session is torn down.
    element: Option<E>,
}

impl<E, F, C> PlayerController<E, F, C>
where
    E: MediaElement,
    F: EngineFactory,
    C: PointerCapture,
{
    /// Mounts the player on `element` and pushes the initial state to it.
    pub fn new(element: E, factory: F, capture: C, config: &Config) -> Self {
        Self::with_diagnostics(element, factory, capture, config, None)
    }

    /// Like [`Self::new`], recording user actions and stream events.
    pub fn with_diagnostics(
        element: E,
        factory: F,
        capture: C,
        config: &Config,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let initial = PlaybackState::new(config.initial_volume(), config.initial_muted());
        let session = StreamSession::new(factory, config.engine_config(), config.start_debounce())
            .with_diagnostics(diagnostics.clone());

        let mut controller = Self {
            store: PlaybackStateStore::new(initial),
            binder: MediaBinder::new(),
            scrubber: ScrubberController::new(config.scrub_throttle()),
            layout: LayoutController::new(diagnostics.clone()),
            session,
            capture,
            track: None,
            autoplay_on_ready: config.autoplay_on_ready(),
            diagnostics,
            element: Some(element),
        };
        controller.reconcile();
        controller
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn state(&self) -> Arc<PlaybackState> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn surface(&self) -> ControlSurface {
        ControlSurface::derive(self.store.state(), self.session.state())
    }

    #[must_use]
    pub fn session(&self) -> &StreamSession<F> {
        &self.session
    }

    #[must_use]
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    #[must_use]
    pub fn is_capturing_pointer(&self) -> bool {
        self.scrubber.is_capturing()
    }

    /// Earliest instant at which a [`Message::Tick`] has work to do.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.scrubber.flush_deadline(), self.session.start_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MESSAGE HANDLING
    // ═══════════════════════════════════════════════════════════════════════

    pub fn handle(&mut self, message: Message) -> Effect {
        self.handle_at(message, Instant::now())
    }

    /// Handles `message` as if it arrived at `now`.
    pub fn handle_at(&mut self, message: Message, now: Instant) -> Effect {
        let changed = match message {
            Message::TogglePlayback => {
                self.log_action(PlayerAction::TogglePlayback);
                self.store.dispatch(Transition::TogglePlay);
                true
            }
            Message::SetVolume(volume) => {
                self.log_action(PlayerAction::SetVolume { volume });
                self.store.dispatch(Transition::SetVolume(volume));
                true
            }
            Message::ToggleMute => {
                self.log_action(PlayerAction::ToggleMute);
                self.store.dispatch(Transition::ToggleMute);
                true
            }
            Message::SetTrack(track) => {
                self.track = track;
                false
            }
            Message::PointerDown { pointer_x } => {
                let began = self.scrubber.pointer_down(
                    &mut self.store,
                    &mut self.capture,
                    pointer_x,
                    self.track,
                );
                if began {
                    self.log_action(PlayerAction::BeginScrub {
                        position_secs: self.store.state().current_time(),
                    });
                }
                began
            }
            Message::PointerMove { pointer_x } => {
                self.scrubber
                    .pointer_move(&mut self.store, pointer_x, self.track, now)
            }
            Message::PointerUp => {
                let ended = self.scrubber.pointer_up(&mut self.store);
                if ended {
                    self.log_action(PlayerAction::EndScrub);
                }
                ended
            }
            Message::ToggleTheater => {
                self.log_action(PlayerAction::ToggleTheater);
                self.layout.toggle_theater(&mut self.store);
                true
            }
            Message::ToggleFullscreen => {
                self.log_action(PlayerAction::ToggleFullscreen);
                self.layout.toggle_fullscreen(&mut self.store);
                true
            }
            Message::RequestPictureInPicture => {
                self.log_action(PlayerAction::RequestPictureInPicture);
                return match self.layout.request_picture_in_picture(self.element.as_mut()) {
                    Some(pending) => Effect::Pending(vec![pending]),
                    None => Effect::None,
                };
            }
            Message::SelectSource(url) => {
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics
                        .log_action_with_details(PlayerAction::SelectSource, Some(url.clone()));
                }
                self.session.start(url, now);
                let effect = self.session.poll(now);
                return self.apply_session_effect(effect);
            }
            Message::Element(event) => {
                self.binder.on_element_event(event, &mut self.store);
                true
            }
            Message::Engine { generation, event } => {
                let effect = self.session.handle_engine_event(generation, event, now);
                return self.apply_session_effect(effect);
            }
            Message::Tick => {
                let flushed = self.scrubber.poll(&mut self.store, now);
                let session_effect = self.session.poll(now);
                let effect = self.apply_session_effect(session_effect);
                if flushed && matches!(effect, Effect::None) {
                    return self.reconcile();
                }
                return effect;
            }
        };

        if changed {
            self.reconcile()
        } else {
            Effect::None
        }
    }

    /// Waits for the debounced stream start, then fires it.
    pub async fn wait_for_stream_start(&mut self) -> Effect {
        let effect = self.session.wait_for_start().await;
        self.apply_session_effect(effect)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TEARDOWN
    // ═══════════════════════════════════════════════════════════════════════

    /// Unmounts the player: detaches pointer listeners, cancels the stream
    /// session, then hands the element back.
    pub fn teardown(&mut self) -> Option<E> {
        self.scrubber.release();
        self.session.teardown();
        self.element.take()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════

    fn apply_session_effect(&mut self, effect: SessionEffect) -> Effect {
        match effect {
            SessionEffect::None => Effect::None,
            SessionEffect::Ready => {
                if self.autoplay_on_ready {
                    self.store.dispatch(Transition::SetPlayIntent(true));
                    self.reconcile()
                } else {
                    Effect::None
                }
            }
            SessionEffect::DirectSource(url) => {
                if let Some(element) = self.element.as_mut() {
                    element.set_source(&url);
                }
                Effect::None
            }
            SessionEffect::Failed(err) => Effect::StreamFailed(err),
        }
    }

    fn reconcile(&mut self) -> Effect {
        let outcome = self.binder.reconcile(self.element.as_mut(), &mut self.store);
        match outcome.pending {
            Some(pending) => Effect::Pending(vec![pending]),
            None => Effect::None,
        }
    }

    fn log_action(&self, action: PlayerAction) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_action(action);
        }
    }
}

impl<E, F, C> Drop for PlayerController<E, F, C>
where
    E: MediaElement,
    F: EngineFactory,
    C: PointerCapture,
{
    fn drop(&mut self) {
        self.scrubber.release();
        self.session.teardown();
    }
}
