// SPDX-License-Identifier: MPL-2.0
//! Player state synchronization.
//!
//! User intent lives in a [`PlaybackStateStore`] as immutable snapshots;
//! the [`MediaBinder`] pushes it to the playback element and folds element
//! events back in. The [`ScrubberController`] overlays the drag-to-seek
//! gesture on that single time source.

pub mod binder;
pub mod clock;
pub mod element;
pub mod layout;
pub mod scrubber;
pub mod state;
pub mod store;
pub mod surface;
pub mod volume;

pub use binder::{ElementCommand, MediaBinder, Reconciliation};
pub use clock::{format_time, PlaybackClock};
pub use element::{CommandFuture, CommandKind, ElementEvent, MediaElement, PendingCommand};
pub use layout::LayoutController;
pub use scrubber::{
    ListenerRegistration, PointerCapture, ScrubThrottle, ScrubberController, TrackRect,
};
pub use state::{Layout, PlaybackState, Transition};
pub use store::PlaybackStateStore;
pub use surface::{ControlSurface, PlayIcon};
pub use volume::{Volume, VolumeTier};
