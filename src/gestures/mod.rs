//! Pointer gesture state machines.
//!
//! Controllers never draw anything. The view feeds them pointer positions and
//! measured rectangles; they read and mutate the injected [`BlockStore`] and
//! hand back [`EditorRequest`]s for the editor window.
//!
//! [`BlockStore`]: crate::services::block::BlockStore

use egui::Rect;

use crate::models::block::Track;

pub mod date_range;
pub mod drag;
pub mod editor;
pub mod selection;

pub use date_range::{DateRangeController, DateRangeOutcome};
pub use drag::{DragMoveController, DragSession};
pub use editor::{EditorMode, EditorRequest, EditorTarget};
pub use selection::SelectionController;

/// Screen rectangles of the two timeline columns for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub plan: Rect,
    pub execution: Rect,
}

impl TrackBounds {
    pub fn rect(&self, track: Track) -> Rect {
        match track {
            Track::Plan => self.plan,
            Track::Execution => self.execution,
        }
    }

    /// Track whose horizontal extent contains `x`.
    pub fn track_at_x(&self, x: f32) -> Option<Track> {
        Track::ALL
            .into_iter()
            .find(|track| self.rect(*track).x_range().contains(x))
    }
}
