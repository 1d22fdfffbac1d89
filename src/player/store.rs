// SPDX-License-Identifier: MPL-2.0
//! Single source of truth for player state.

use std::sync::Arc;

use super::state::{PlaybackState, Transition};

/// Holds the current [`PlaybackState`] snapshot.
///
/// Every mutation goes through [`PlaybackStateStore::dispatch`]; readers get
/// a shared snapshot that never changes under them.
#[derive(Debug, Clone)]
pub struct PlaybackStateStore {
    state: Arc<PlaybackState>,
    revision: u64,
}

impl PlaybackStateStore {
    #[must_use]
    pub fn new(initial: PlaybackState) -> Self {
        Self {
            state: Arc::new(initial),
            revision: 0,
        }
    }

    /// Applies `transition` and returns the new snapshot.
    ///
    /// Each dispatch yields exactly one new snapshot and bumps the revision,
    /// even when the transition was a no-op.
    pub fn dispatch(&mut self, transition: Transition) -> Arc<PlaybackState> {
        let next = transition.apply(&self.state);
        self.state = Arc::new(next);
        self.revision += 1;
        tracing::trace!(revision = self.revision, ?transition, "dispatched");
        Arc::clone(&self.state)
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PlaybackState> {
        Arc::clone(&self.state)
    }

    /// Borrow of the current state without bumping the refcount.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Number of dispatches since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for PlaybackStateStore {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}
