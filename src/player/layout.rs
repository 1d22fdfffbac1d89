// SPDX-License-Identifier: MPL-2.0
//! Theater, fullscreen and picture-in-picture presentation toggles.

use super::element::{CommandKind, MediaElement, PendingCommand};
use super::state::{PlaybackState, Transition};
use super::store::PlaybackStateStore;
use crate::diagnostics::DiagnosticsHandle;

#[derive(Debug, Default, Clone)]
pub struct LayoutController {
    diagnostics: Option<DiagnosticsHandle>,
}

impl LayoutController {
    #[must_use]
    pub fn new(diagnostics: Option<DiagnosticsHandle>) -> Self {
        Self { diagnostics }
    }

    pub fn toggle_theater(&self, store: &mut PlaybackStateStore) {
        store.dispatch(Transition::ToggleTheater);
    }

    pub fn toggle_fullscreen(&self, store: &mut PlaybackStateStore) {
        store.dispatch(Transition::ToggleFullscreen);
    }

    /// Asks the element for picture-in-picture.
    ///
    /// Fire-and-forget: mini mode only changes when the element reports it,
    /// and a rejection is logged rather than stored.
    pub fn request_picture_in_picture<E>(&self, element: Option<&mut E>) -> Option<PendingCommand>
    where
        E: MediaElement + ?Sized,
    {
        let element = element?;
        Some(
            PendingCommand::new(
                CommandKind::PictureInPicture,
                element.request_picture_in_picture(),
            )
            .with_diagnostics(self.diagnostics.clone()),
        )
    }

    /// The mini-player button makes no sense over a fullscreen surface.
    #[must_use]
    pub fn show_mini_player_button(state: &PlaybackState) -> bool {
        !state.is_fullscreen()
    }
}
