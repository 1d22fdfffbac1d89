// SPDX-License-Identifier: MPL-2.0
//! Render-ready view of the player for the markup layer.

use super::layout::LayoutController;
use super::state::{Layout, PlaybackState};
use super::volume::VolumeTier;
use crate::error::StreamError;
use crate::stream::SessionState;

/// Icon shown on the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

/// Everything the control markup needs, derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurface {
    pub progress_fraction: f64,
    pub play_icon: PlayIcon,
    pub volume_tier: VolumeTier,
    /// Slider position; pinned to 0 while muted.
    pub slider_volume: f32,
    pub is_muted: bool,
    pub is_scrubbing: bool,
    pub layout: Layout,
    pub is_theater: bool,
    pub is_fullscreen: bool,
    pub is_mini_mode: bool,
    pub show_mini_player_button: bool,
    pub elapsed_label: String,
    pub duration_label: String,
    pub stream_error: Option<StreamError>,
}

impl ControlSurface {
    #[must_use]
    pub fn derive(state: &PlaybackState, stream_state: &SessionState) -> Self {
        let clock = state.clock();
        let slider_volume = if state.is_muted() {
            0.0
        } else {
            state.volume().value()
        };

        Self {
            progress_fraction: clock.progress_fraction(),
            play_icon: if state.is_play_intent() {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
            volume_tier: VolumeTier::for_level(state.volume(), state.is_muted()),
            slider_volume,
            is_muted: state.is_muted(),
            is_scrubbing: state.is_scrubbing(),
            layout: state.layout(),
            is_theater: state.is_theater(),
            is_fullscreen: state.is_fullscreen(),
            is_mini_mode: state.is_mini_mode(),
            show_mini_player_button: LayoutController::show_mini_player_button(state),
            elapsed_label: clock.elapsed_label(),
            duration_label: clock.duration_label(),
            stream_error: stream_state.fatal_error().cloned(),
        }
    }
}
