// SPDX-License-Identifier: MPL-2.0
//! Bridge between the state store and the playback element.
//!
//! The binder is the only component that writes to the element. It pushes
//! deltas only, so calling [`MediaBinder::reconcile`] twice in a row on the
//! same snapshot issues nothing the second time.

use super::element::{CommandKind, ElementEvent, MediaElement, PendingCommand};
use super::state::Transition;
use super::store::PlaybackStateStore;

/// Volume difference below which the element is considered in sync.
const VOLUME_TOLERANCE: f32 = 1e-4;

/// A write issued to the element during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementCommand {
    SetVolume(f32),
    SetMuted(bool),
    Play,
    Pause,
    Seek(f64),
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Writes issued, in order.
    pub commands: Vec<ElementCommand>,
    /// Asynchronous play/pause still settling, if one was issued.
    pub pending: Option<PendingCommand>,
}

impl Reconciliation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MediaBinder;

impl MediaBinder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pushes the current snapshot to the element.
    ///
    /// Order: volume, mute, play/pause, then the pending seek. A pending seek
    /// is written once and cleared with `SeekApplied`. Without an element
    /// nothing is issued and the seek stays queued.
    pub fn reconcile<E>(
        &self,
        element: Option<&mut E>,
        store: &mut PlaybackStateStore,
    ) -> Reconciliation
    where
        E: MediaElement + ?Sized,
    {
        let Some(element) = element else {
            return Reconciliation::default();
        };
        let state = store.snapshot();
        let mut outcome = Reconciliation::default();

        let volume = state.volume().value();
        if (element.volume() - volume).abs() > VOLUME_TOLERANCE {
            element.set_volume(volume);
            outcome.commands.push(ElementCommand::SetVolume(volume));
        }

        if element.muted() != state.is_muted() {
            element.set_muted(state.is_muted());
            outcome.commands.push(ElementCommand::SetMuted(state.is_muted()));
        }

        if state.is_play_intent() && element.paused() {
            outcome.commands.push(ElementCommand::Play);
            outcome.pending = Some(PendingCommand::new(CommandKind::Play, element.play()));
        } else if !state.is_play_intent() && !element.paused() {
            outcome.commands.push(ElementCommand::Pause);
            outcome.pending = Some(PendingCommand::new(CommandKind::Pause, element.pause()));
        }

        if let Some(time) = state.pending_seek() {
            element.set_current_time(time);
            outcome.commands.push(ElementCommand::Seek(time));
            store.dispatch(Transition::SeekApplied);
        }

        if !outcome.is_empty() {
            tracing::trace!(commands = ?outcome.commands, "reconciled element");
        }
        outcome
    }

    /// Folds an element notification into the store.
    pub fn on_element_event(&self, event: ElementEvent, store: &mut PlaybackStateStore) {
        let transition = match event {
            ElementEvent::TimeUpdate {
                current_time,
                duration,
            } => Transition::ObserveTime {
                current_time,
                duration,
            },
            ElementEvent::LoadedMetadata { duration } => {
                Transition::ObserveMetadataLoaded { duration }
            }
            ElementEvent::PictureInPictureChanged(active) => Transition::ObserveMiniMode(active),
        };
        store.dispatch(transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElementError;
    use crate::test_utils::{assert_abs_diff_eq, FakeElement};
    use futures_util::FutureExt;

    fn synced_pair() -> (FakeElement, PlaybackStateStore) {
        let mut element = FakeElement::default();
        let mut store = PlaybackStateStore::default();
        MediaBinder::new().reconcile(Some(&mut element), &mut store);
        (element, store)
    }

    #[test]
    fn first_reconcile_pushes_volume_and_mute() {
        let mut element = FakeElement::default();
        element.set_volume(1.0);
        let mut store = PlaybackStateStore::default();

        let outcome = MediaBinder::new().reconcile(Some(&mut element), &mut store);

        assert_eq!(
            outcome.commands,
            vec![ElementCommand::SetVolume(0.5), ElementCommand::SetMuted(true)]
        );
        assert!(outcome.pending.is_none());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let (mut element, mut store) = synced_pair();
        store.dispatch(Transition::SetPlayIntent(true));

        let first = MediaBinder::new().reconcile(Some(&mut element), &mut store);
        let second = MediaBinder::new().reconcile(Some(&mut element), &mut store);

        assert_eq!(first.commands, vec![ElementCommand::Play]);
        assert!(second.is_empty());
        assert_eq!(element.play_calls(), 1);
    }

    #[test]
    fn pause_is_issued_only_when_element_is_playing() {
        let (mut element, mut store) = synced_pair();
        let outcome = MediaBinder::new().reconcile(Some(&mut element), &mut store);
        assert!(outcome.is_empty());
        assert_eq!(element.pause_calls(), 0);

        store.dispatch(Transition::SetPlayIntent(true));
        MediaBinder::new().reconcile(Some(&mut element), &mut store);
        store.dispatch(Transition::SetPlayIntent(false));
        let outcome = MediaBinder::new().reconcile(Some(&mut element), &mut store);

        assert_eq!(outcome.commands, vec![ElementCommand::Pause]);
        assert!(element.paused());
    }

    #[test]
    fn pending_seek_is_applied_once() {
        let (mut element, mut store) = synced_pair();
        store.dispatch(Transition::ObserveMetadataLoaded { duration: 100.0 });
        store.dispatch(Transition::BeginScrub(25.0));

        let outcome = MediaBinder::new().reconcile(Some(&mut element), &mut store);

        assert_eq!(outcome.commands, vec![ElementCommand::Seek(25.0)]);
        assert_eq!(store.state().pending_seek(), None);
        assert_abs_diff_eq!(element.current_time(), 25.0);

        let again = MediaBinder::new().reconcile(Some(&mut element), &mut store);
        assert!(again.is_empty());
    }

    #[test]
    fn missing_element_keeps_seek_queued() {
        let mut store = PlaybackStateStore::default();
        store.dispatch(Transition::BeginScrub(3.0));

        let outcome = MediaBinder::new().reconcile(None::<&mut FakeElement>, &mut store);

        assert!(outcome.is_empty());
        assert_eq!(store.state().pending_seek(), Some(3.0));
    }

    #[test]
    fn rejected_play_is_retried_on_next_reconcile() {
        let (mut element, mut store) = synced_pair();
        element.reject_play_with(ElementError::NotAllowed("autoplay".into()));
        store.dispatch(Transition::SetPlayIntent(true));

        let outcome = MediaBinder::new().reconcile(Some(&mut element), &mut store);
        let pending = outcome.pending.expect("play should be pending");
        assert_eq!(pending.now_or_never(), Some(()));
        assert!(element.paused());
        assert!(store.state().is_play_intent());

        element.allow_play();
        let retry = MediaBinder::new().reconcile(Some(&mut element), &mut store);
        assert_eq!(retry.commands, vec![ElementCommand::Play]);
        assert!(!element.paused());
    }

    #[test]
    fn element_events_fold_into_store() {
        let mut store = PlaybackStateStore::default();
        let binder = MediaBinder::new();

        binder.on_element_event(ElementEvent::LoadedMetadata { duration: 90.0 }, &mut store);
        binder.on_element_event(
            ElementEvent::TimeUpdate {
                current_time: 30.0,
                duration: 90.0,
            },
            &mut store,
        );
        binder.on_element_event(ElementEvent::PictureInPictureChanged(true), &mut store);

        assert_abs_diff_eq!(store.state().duration(), 90.0);
        assert_abs_diff_eq!(store.state().current_time(), 30.0);
        assert!(store.state().is_mini_mode());
    }
}
