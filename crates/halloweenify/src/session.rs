//! Per-activation engine state.
//!
//! Drag bookkeeping, captured originals, live flags and pending timer
//! handles all live in one owned [`Session`] with a lifecycle tied to
//! activation/restoration.

use crate::dom::TimerId;
use crate::logo::DragState;
use crate::options::Options;

/// Mutable engine state for a single page load.
#[derive(Debug, Default)]
pub struct Session {
    /// Drag phase and in-gesture bookkeeping for the overlay logo.
    pub(crate) drag: DragState,
    /// Pending hint fade-start timer.
    pub(crate) hint_fade_timer: Option<TimerId>,
    /// Pending hint detach timer (runs after the fade transition).
    pub(crate) hint_remove_timer: Option<TimerId>,
    /// Whether the ghost-link marker and its listeners are live.
    pub(crate) ghost_live: bool,
    /// Title as it was before the marker was applied.
    pub(crate) original_title: Option<String>,
    /// Options waiting for the page to finish loading.
    pub(crate) pending: Option<Options>,
}

impl Session {
    /// Clears drag bookkeeping and hint timer handles. Used by the
    /// restoration path; element removal happens separately.
    pub(crate) fn reset_transients(&mut self) {
        self.drag = DragState::default();
        self.hint_fade_timer = None;
        self.hint_remove_timer = None;
    }
}
