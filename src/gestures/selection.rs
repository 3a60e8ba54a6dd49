use chrono::NaiveDate;
use egui::{Pos2, Rect};

use super::EditorRequest;
use crate::models::block::Track;
use crate::utils::time_grid::{selection_preview, slot_from_pixel_offset, SlotRange, SLOT_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionState {
    Idle,
    Selecting {
        track: Track,
        start_slot: u32,
        current_slot: u32,
    },
}

/// Drag on empty timeline space to pick a time range for a new block.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    slot_height_px: f32,
}

impl SelectionController {
    pub fn new(slot_height_px: f32) -> Self {
        Self {
            state: SelectionState::Idle,
            slot_height_px,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != SelectionState::Idle
    }

    fn slot_at(&self, pointer: Pos2, track_rect: Rect) -> u32 {
        let y = pointer.y.clamp(track_rect.top(), track_rect.bottom()) - track_rect.top();
        slot_from_pixel_offset(y, self.slot_height_px)
    }

    /// Start selecting on pointer-down. Ignored while a block drag is active
    /// or when the pointer is outside the track.
    pub fn begin(&mut self, track: Track, pointer: Pos2, track_rect: Rect, drag_active: bool) -> bool {
        if drag_active || self.is_active() || !track_rect.contains(pointer) {
            return false;
        }
        let slot = self.slot_at(pointer, track_rect);
        self.state = SelectionState::Selecting {
            track,
            start_slot: slot,
            current_slot: slot,
        };
        true
    }

    /// Follow the pointer, clamped to the track being selected in.
    pub fn update(&mut self, pointer: Pos2, track_rect: Rect) {
        let slot = self.slot_at(pointer, track_rect);
        if let SelectionState::Selecting {
            ref mut current_slot,
            ..
        } = self.state
        {
            *current_slot = slot;
        }
    }

    /// Track and slot range currently highlighted.
    pub fn preview(&self) -> Option<(Track, SlotRange)> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Selecting {
                track,
                start_slot,
                current_slot,
            } => Some((track, selection_preview(start_slot, current_slot))),
        }
    }

    /// Finish on pointer-up, producing an add request for `date` when the
    /// range covers at least one slot.
    pub fn finish(&mut self, date: NaiveDate) -> Option<EditorRequest> {
        let (track, range) = self.preview()?;
        self.state = SelectionState::Idle;

        if range.duration_minutes() < SLOT_MINUTES {
            return None;
        }
        log::debug!(
            "Selected {}..{} on {:?}",
            range.start_minutes(),
            range.end_minutes(),
            track
        );
        Some(EditorRequest::new_block(
            track,
            range.start_minutes(),
            range.end_minutes(),
            date,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::test_support::bounds;
    use crate::gestures::EditorMode;
    use egui::pos2;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_drag_down_creates_request() {
        let rect = bounds().plan;
        let mut selection = SelectionController::new(16.0);
        // slot 54 is 09:00
        assert!(selection.begin(Track::Plan, pos2(50.0, 100.0 + 54.0 * 16.0 + 2.0), rect, false));
        selection.update(pos2(50.0, 100.0 + 59.0 * 16.0 + 8.0), rect);

        let request = selection.finish(date()).unwrap();
        assert_eq!(request.mode, EditorMode::Add);
        assert_eq!(request.track, Track::Plan);
        assert_eq!((request.start_minutes, request.end_minutes), (540, 600));
        assert_eq!(request.start_date, date());
        assert!(!selection.is_active());
    }

    #[test]
    fn test_drag_up_is_normalised() {
        let rect = bounds().execution;
        let mut selection = SelectionController::new(16.0);
        selection.begin(Track::Execution, pos2(250.0, 100.0 + 10.0 * 16.0), rect, false);
        selection.update(pos2(250.0, 100.0 + 7.0 * 16.0), rect);
        assert_eq!(
            selection.preview(),
            Some((Track::Execution, SlotRange { start: 7, end: 11 }))
        );
    }

    #[test]
    fn test_tap_selects_one_slot() {
        let rect = bounds().plan;
        let mut selection = SelectionController::new(16.0);
        selection.begin(Track::Plan, pos2(10.0, 100.0), rect, false);
        let request = selection.finish(date()).unwrap();
        assert_eq!((request.start_minutes, request.end_minutes), (0, 10));
    }

    #[test]
    fn test_suppressed_while_dragging_block() {
        let rect = bounds().plan;
        let mut selection = SelectionController::new(16.0);
        assert!(!selection.begin(Track::Plan, pos2(10.0, 200.0), rect, true));
        assert!(selection.finish(date()).is_none());
    }

    #[test]
    fn test_pointer_outside_track_is_ignored() {
        let mut selection = SelectionController::new(16.0);
        assert!(!selection.begin(Track::Plan, pos2(300.0, 200.0), bounds().plan, false));
    }

    #[test]
    fn test_runaway_pointer_is_clamped_to_track() {
        let rect = bounds().plan;
        let mut selection = SelectionController::new(16.0);
        selection.begin(Track::Plan, pos2(10.0, 100.0 + 140.0 * 16.0), rect, false);
        selection.update(pos2(900.0, 99_999.0), rect);
        let (_, range) = selection.preview().unwrap();
        assert_eq!(range, SlotRange { start: 140, end: 144 });

        selection.update(pos2(10.0, -5_000.0), rect);
        let (_, range) = selection.preview().unwrap();
        assert_eq!(range.start, 0);
    }
}
