// SPDX-License-Identifier: MPL-2.0
//! Contract of the playback element the player drives.
//!
//! The element is the time source and the only thing that actually plays
//! media. It is owned by the host; the player talks to it exclusively through
//! [`MediaElement`], and only from the binder and the layout controller.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::diagnostics::DiagnosticsHandle;
use crate::error::ElementError;

/// Settlement of an asynchronous element command.
pub type CommandFuture = BoxFuture<'static, Result<(), ElementError>>;

/// A playback element (video tag, native surface, test fake...).
///
/// `paused()` must report `false` as soon as `play()` has been requested and
/// revert to `true` if the request is later rejected.
pub trait MediaElement {
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);

    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn paused(&self) -> bool;

    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);

    /// NaN before metadata loads, +inf for live streams.
    fn duration(&self) -> f64;

    /// Hands a URL directly to the element, bypassing the adaptive engine.
    fn set_source(&mut self, url: &str);

    fn play(&mut self) -> CommandFuture;
    fn pause(&mut self) -> CommandFuture;
    fn request_picture_in_picture(&mut self) -> CommandFuture;
}

/// Notifications emitted by the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementEvent {
    TimeUpdate { current_time: f64, duration: f64 },
    LoadedMetadata { duration: f64 },
    PictureInPictureChanged(bool),
}

/// Which command a [`PendingCommand`] is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Play,
    Pause,
    PictureInPicture,
}

/// An in-flight element command whose rejection is swallowed.
///
/// Awaiting it never fails: player intent stays the source of truth, and
/// the next reconciliation retries because the element state did not change.
/// Picture-in-picture rejections are surfaced as a warning instead.
pub struct PendingCommand {
    kind: CommandKind,
    future: CommandFuture,
    diagnostics: Option<DiagnosticsHandle>,
}

impl PendingCommand {
    #[must_use]
    pub fn new(kind: CommandKind, future: CommandFuture) -> Self {
        Self {
            kind,
            future,
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics handle that records rejections as warnings.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: Option<DiagnosticsHandle>) -> Self {
        self.diagnostics = handle;
        self
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    fn report_rejection(&self, err: &ElementError) {
        match self.kind {
            CommandKind::Play | CommandKind::Pause => {
                tracing::debug!(command = ?self.kind, error = %err, "element command rejected");
            }
            CommandKind::PictureInPicture => {
                tracing::warn!(error = %err, "picture-in-picture request rejected");
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.log_warning(format!("picture-in-picture rejected: {}", err));
                }
            }
        }
    }
}

impl Future for PendingCommand {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.future.poll_unpin(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(())) => Poll::Ready(()),
            Poll::Ready(Err(err)) => {
                self.report_rejection(&err);
                Poll::Ready(())
            }
        }
    }
}

impl fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCommand")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
