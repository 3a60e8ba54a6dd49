use std::time::{Duration, Instant};

use egui::Pos2;

use super::TrackBounds;
use crate::models::block::{BlockId, BlockPatch, Track};
use crate::services::block::BlockStore;
use crate::utils::time_grid::{MAX_MINUTES, SLOT_MINUTES};

/// The block being dragged, updated in place on every move so the next
/// event always sees the current id and track.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: BlockId,
    pub track: Track,
    pub start_y: f32,
    pub original_start: u32,
    pub original_end: u32,
}

impl DragSession {
    pub fn duration(&self) -> u32 {
        self.original_end - self.original_start
    }

    /// Times after moving the pointer to `pointer_y`, kept inside the day.
    pub fn shifted_times(&self, pointer_y: f32, slot_height_px: f32) -> (u32, u32) {
        let delta_slots = slot_delta(pointer_y - self.start_y, slot_height_px);
        let duration = self.duration() as i64;
        let latest_start = MAX_MINUTES as i64 - duration;
        let start = (self.original_start as i64)
            .saturating_add(delta_slots.saturating_mul(SLOT_MINUTES as i64))
            .clamp(0, latest_start) as u32;
        (start, start + self.duration())
    }
}

fn slot_delta(delta_y: f32, slot_height_px: f32) -> i64 {
    if !(delta_y.is_finite() && slot_height_px > 0.0) {
        return 0;
    }
    (delta_y / slot_height_px).round() as i64
}

/// Moves existing blocks vertically in slot steps and across tracks.
#[derive(Debug, Clone)]
pub struct DragMoveController {
    session: Option<DragSession>,
    did_move: bool,
    released_at: Option<Instant>,
    slot_height_px: f32,
    grace: Duration,
}

impl DragMoveController {
    pub fn new(slot_height_px: f32, grace: Duration) -> Self {
        Self {
            session: None,
            did_move: false,
            released_at: None,
            slot_height_px,
            grace,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn dragging_id(&self) -> Option<&BlockId> {
        self.session.as_ref().map(|s| &s.id)
    }

    /// Grab block `id` of `track` at vertical position `pointer_y`.
    pub fn begin(&mut self, store: &BlockStore, track: Track, id: &BlockId, pointer_y: f32) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(block) = store.get(track, id) else {
            return false;
        };

        self.did_move = false;
        self.released_at = None;
        self.session = Some(DragSession {
            id: block.id.clone(),
            track,
            start_y: pointer_y,
            original_start: block.start,
            original_end: block.end,
        });
        true
    }

    /// Apply one pointer-move event. Returns whether the store was asked to
    /// change.
    pub fn update(&mut self, store: &mut BlockStore, pointer: Pos2, bounds: &TrackBounds) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let delta_slots = slot_delta(pointer.y - session.start_y, self.slot_height_px);
        if delta_slots != 0 {
            self.did_move = true;
        }
        let (start, end) = session.shifted_times(pointer.y, self.slot_height_px);

        let destination = session.track.other();
        if bounds.rect(destination).x_range().contains(pointer.x) {
            return match store.move_across_tracks(session.track, &session.id, destination, start, end) {
                Ok(true) => {
                    session.track = destination;
                    self.did_move = true;
                    true
                }
                Ok(false) => false,
                Err(e) => {
                    log::warn!("Cross-track move of {} refused: {}", session.id, e);
                    false
                }
            };
        }

        match store.update(session.track, &session.id, &BlockPatch::new().times(start, end)) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Drag of {} refused: {}", session.id, e);
                false
            }
        }
    }

    /// End the drag on pointer-up.
    pub fn finish(&mut self, now: Instant) -> Option<DragSession> {
        let session = self.session.take()?;
        self.released_at = Some(now);
        Some(session)
    }

    /// Whether a click on a block at `now` belongs to a drag and must not
    /// open the editor.
    pub fn should_suppress_click(&self, now: Instant) -> bool {
        if self.session.is_some() {
            return true;
        }
        match self.released_at {
            Some(released) if self.did_move => now.saturating_duration_since(released) < self.grace,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::test_support::bounds;
    use crate::models::block::TimeBlock;
    use chrono::NaiveDate;
    use egui::pos2;

    const GRACE: Duration = Duration::from_millis(100);

    fn setup(track: Track, start: u32, end: u32) -> (BlockStore, BlockId) {
        let mut store = BlockStore::new();
        let block = TimeBlock::builder()
            .id("b1")
            .title("Physics")
            .description("lab report")
            .times(start, end)
            .date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap();
        let id = store.add(track, block).unwrap();
        (store, id)
    }

    fn times(store: &BlockStore, track: Track, id: &BlockId) -> (u32, u32) {
        let block = store.get(track, id).unwrap();
        (block.start, block.end)
    }

    #[test]
    fn test_vertical_drag_moves_in_slot_steps() {
        let (mut store, id) = setup(Track::Plan, 540, 600);
        let mut drag = DragMoveController::new(16.0, GRACE);
        assert!(drag.begin(&store, Track::Plan, &id, 500.0));

        // 2.4 slots rounds to 2
        assert!(drag.update(&mut store, pos2(50.0, 500.0 + 38.4), &bounds()));
        assert_eq!(times(&store, Track::Plan, &id), (560, 620));

        drag.update(&mut store, pos2(50.0, 500.0 - 16.0), &bounds());
        assert_eq!(times(&store, Track::Plan, &id), (530, 590));
    }

    #[test]
    fn test_drag_clamps_to_day() {
        let (mut store, id) = setup(Track::Execution, 600, 690);
        let mut drag = DragMoveController::new(16.0, GRACE);
        drag.begin(&store, Track::Execution, &id, 500.0);

        drag.update(&mut store, pos2(300.0, -1.0e6), &bounds());
        assert_eq!(times(&store, Track::Execution, &id), (0, 90));

        drag.update(&mut store, pos2(300.0, 1.0e6), &bounds());
        assert_eq!(times(&store, Track::Execution, &id), (1350, 1440));
    }

    #[test]
    fn test_extreme_pointer_offsets_saturate_instead_of_overflowing() {
        let session = DragSession {
            id: "b1".into(),
            track: Track::Plan,
            start_y: 0.0,
            original_start: 600,
            original_end: 660,
        };
        // a tiny slot height pushes the slot delta to the i64 limits
        assert_eq!(session.shifted_times(f32::MAX, 1.0e-30), (1380, 1440));
        assert_eq!(session.shifted_times(-f32::MAX, 1.0e-30), (0, 60));
    }

    #[test]
    fn test_cross_track_move_keeps_id_and_duration() {
        let (mut store, id) = setup(Track::Plan, 540, 600);
        let mut drag = DragMoveController::new(16.0, GRACE);
        drag.begin(&store, Track::Plan, &id, 500.0);

        assert!(drag.update(&mut store, pos2(300.0, 532.0), &bounds()));
        assert_eq!(store.locate(&id), Some(Track::Execution));
        assert_eq!(drag.session().unwrap().track, Track::Execution);
        assert_eq!(times(&store, Track::Execution, &id), (560, 620));
        assert_eq!(
            store.get(Track::Execution, &id).unwrap().description.as_deref(),
            Some("lab report")
        );

        // further moves stay in the new track without duplicating
        drag.update(&mut store, pos2(310.0, 548.0), &bounds());
        drag.update(&mut store, pos2(320.0, 548.0), &bounds());
        assert_eq!(store.blocks(Track::Execution).len(), 1);
        assert!(store.blocks(Track::Plan).is_empty());

        // and back again
        drag.update(&mut store, pos2(20.0, 500.0), &bounds());
        assert_eq!(store.locate(&id), Some(Track::Plan));
        assert_eq!(times(&store, Track::Plan, &id), (540, 600));
    }

    #[test]
    fn test_click_suppressed_during_grace_after_real_drag() {
        let (mut store, id) = setup(Track::Plan, 540, 600);
        let mut drag = DragMoveController::new(16.0, GRACE);
        let t0 = Instant::now();

        drag.begin(&store, Track::Plan, &id, 500.0);
        drag.update(&mut store, pos2(50.0, 532.0), &bounds());
        assert!(drag.should_suppress_click(t0));

        drag.finish(t0);
        assert!(!drag.is_active());
        assert!(drag.should_suppress_click(t0 + Duration::from_millis(50)));
        assert!(!drag.should_suppress_click(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn test_zero_net_movement_allows_click() {
        let (mut store, id) = setup(Track::Plan, 540, 600);
        let revision = store.revision();
        let mut drag = DragMoveController::new(16.0, GRACE);
        let t0 = Instant::now();

        drag.begin(&store, Track::Plan, &id, 500.0);
        drag.update(&mut store, pos2(50.0, 505.0), &bounds());
        drag.finish(t0);

        assert_eq!(times(&store, Track::Plan, &id), (540, 600));
        assert_eq!(store.revision(), revision);
        assert!(!drag.should_suppress_click(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_begin_on_missing_block() {
        let (store, _) = setup(Track::Plan, 540, 600);
        let mut drag = DragMoveController::new(16.0, GRACE);
        assert!(!drag.begin(&store, Track::Execution, &"b1".into(), 0.0));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_update_without_session_is_noop() {
        let (mut store, _) = setup(Track::Plan, 540, 600);
        let mut drag = DragMoveController::new(16.0, GRACE);
        assert!(!drag.update(&mut store, pos2(50.0, 900.0), &bounds()));
        assert!(drag.finish(Instant::now()).is_none());
    }
}
