// Invariants checked over random inputs

use std::time::Duration;

use chrono::NaiveDate;
use day_planner::gestures::{DragMoveController, TrackBounds};
use day_planner::models::block::{TimeBlock, Track};
use day_planner::services::block::BlockStore;
use day_planner::services::lanes::{calculate_lanes, overlap_clusters};
use day_planner::utils::time_grid::{
    format_clock, minutes_from_slot, slot_from_pixel_offset, MAX_MINUTES, SLOT_MINUTES,
    TOTAL_SLOTS,
};
use egui::{pos2, Rect};
use proptest::prelude::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Slot-aligned block ranges inside one day.
fn block_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0..TOTAL_SLOTS).prop_flat_map(|start| {
        (Just(start), 1..=(TOTAL_SLOTS - start)).prop_map(|(start, len)| {
            (start * SLOT_MINUTES, (start + len) * SLOT_MINUTES)
        })
    })
}

fn blocks_from(ranges: &[(u32, u32)]) -> Vec<TimeBlock> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, (start, end))| {
            TimeBlock::builder()
                .id(format!("b{}", i).as_str())
                .title("Block")
                .times(*start, *end)
                .date(date())
                .build()
                .unwrap()
        })
        .collect()
}

fn bounds() -> TrackBounds {
    TrackBounds {
        plan: Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 2304.0)),
        execution: Rect::from_min_max(pos2(100.0, 0.0), pos2(200.0, 2304.0)),
    }
}

proptest! {
    /// Any pixel offset maps into the day's slot range
    #[test]
    fn prop_slot_is_always_in_range(y in -1.0e7f32..1.0e7f32, h in 0.1f32..200.0) {
        let slot = slot_from_pixel_offset(y, h);
        prop_assert!(slot < TOTAL_SLOTS);
    }

    /// Pixel -> slot -> minutes -> clock text is always a valid HH:MM
    #[test]
    fn prop_clock_round_trip(y in 0.0f32..1.0e6, h in 0.1f32..100.0) {
        let text = format_clock(minutes_from_slot(slot_from_pixel_offset(y, h)));
        prop_assert_eq!(text.len(), 5);
        let (hours, minutes) = text.split_at(2);
        let hours: u32 = hours.parse().unwrap();
        let minutes: u32 = minutes[1..].parse().unwrap();
        prop_assert!(hours < 24);
        prop_assert!(minutes < 60);
    }

    /// Blocks sharing a lane inside a cluster never overlap
    #[test]
    fn prop_lanes_never_overlap(ranges in prop::collection::vec(block_strategy(), 0..24)) {
        let blocks = blocks_from(&ranges);
        let lanes = calculate_lanes(&blocks);

        for cluster in overlap_clusters(&blocks) {
            for (i, a) in cluster.iter().enumerate() {
                for b in cluster.iter().skip(i + 1) {
                    let la = lanes.get(&a.id);
                    let lb = lanes.get(&b.id);
                    prop_assert_eq!(la.total_lanes, lb.total_lanes);
                    if la.lane == lb.lane {
                        prop_assert!(!a.overlaps(b));
                    }
                }
            }
        }
        for block in &blocks {
            let info = lanes.get(&block.id);
            prop_assert!(info.lane < info.total_lanes);
        }
    }

    /// Dragging by any amount keeps the duration and stays inside the day
    #[test]
    fn prop_drag_clamps_and_keeps_duration(
        (start, end) in block_strategy(),
        delta in -1.0e6f32..1.0e6,
        x in 0.0f32..200.0,
    ) {
        let mut store = BlockStore::new();
        let id = store.add(Track::Plan, blocks_from(&[(start, end)]).remove(0)).unwrap();
        let mut drag = DragMoveController::new(16.0, Duration::from_millis(100));
        drag.begin(&store, Track::Plan, &id, 1000.0);
        drag.update(&mut store, pos2(x, 1000.0 + delta), &bounds());

        let track = store.locate(&id).unwrap();
        let moved = store.get(track, &id).unwrap();
        prop_assert_eq!(moved.duration(), end - start);
        prop_assert!(moved.end <= MAX_MINUTES);
        prop_assert_eq!(moved.start % SLOT_MINUTES, 0);
        prop_assert_eq!(store.blocks(Track::Plan).len() + store.blocks(Track::Execution).len(), 1);
    }

    /// Extreme drags pin the block to either end of the day
    #[test]
    fn prop_extreme_drags_pin_to_edges((start, end) in block_strategy()) {
        let duration = end - start;
        let mut store = BlockStore::new();
        let id = store.add(Track::Plan, blocks_from(&[(start, end)]).remove(0)).unwrap();
        let mut drag = DragMoveController::new(16.0, Duration::from_millis(100));
        drag.begin(&store, Track::Plan, &id, 0.0);

        drag.update(&mut store, pos2(10.0, -1.0e9), &bounds());
        let top = store.get(Track::Plan, &id).unwrap();
        prop_assert_eq!((top.start, top.end), (0, duration));

        drag.update(&mut store, pos2(10.0, 1.0e9), &bounds());
        let bottom = store.get(Track::Plan, &id).unwrap();
        prop_assert_eq!((bottom.start, bottom.end), (MAX_MINUTES - duration, MAX_MINUTES));
    }

    /// Moving between tracks never changes a block's duration
    #[test]
    fn prop_cross_track_move_keeps_duration(
        (start, end) in block_strategy(),
        new_start_slot in 0..TOTAL_SLOTS,
    ) {
        let duration = end - start;
        let new_start = (new_start_slot * SLOT_MINUTES).min(MAX_MINUTES - duration);
        let mut store = BlockStore::new();
        let id = store.add(Track::Plan, blocks_from(&[(start, end)]).remove(0)).unwrap();

        let moved = store
            .move_across_tracks(Track::Plan, &id, Track::Execution, new_start, new_start + duration)
            .unwrap();
        prop_assert!(moved);
        prop_assert_eq!(store.get(Track::Execution, &id).unwrap().duration(), duration);
    }

    /// Filtering is a pure read
    #[test]
    fn prop_filter_by_date_is_idempotent(
        ranges in prop::collection::vec(block_strategy(), 0..12),
        day_offsets in prop::collection::vec(0i64..3, 12),
    ) {
        let mut store = BlockStore::new();
        for (block, offset) in blocks_from(&ranges).into_iter().zip(day_offsets) {
            let block = TimeBlock { date: date() + chrono::Duration::days(offset), ..block };
            store.add(Track::Execution, block).unwrap();
        }
        let revision = store.revision();

        let first = store.filter_by_date(Track::Execution, date());
        let second = store.filter_by_date(Track::Execution, date());
        prop_assert_eq!(first, second);
        prop_assert_eq!(store.revision(), revision);
    }

    /// Deleting a group removes exactly its instances
    #[test]
    fn prop_group_delete_is_exact(days_a in 1i64..6, days_b in 1i64..6) {
        let mut store = BlockStore::new();
        let template = blocks_from(&[(540, 600)]).remove(0);
        store.add(Track::Plan, TimeBlock { id: "solo".into(), ..template.clone() }).unwrap();
        store
            .add_multi_day(template.clone(), date(), date() + chrono::Duration::days(days_a))
            .unwrap();
        store
            .add_multi_day(template, date(), date() + chrono::Duration::days(days_b))
            .unwrap();

        let group_a = store.blocks(Track::Plan)[1].group_id.clone().unwrap();
        let removed = store.remove_group(&group_a);
        prop_assert_eq!(removed as i64, days_a + 1);
        prop_assert_eq!(store.blocks(Track::Plan).len() as i64, 1 + days_b + 1);
        prop_assert!(store.blocks(Track::Plan).iter().all(|b| b.group_id.as_ref() != Some(&group_a)));
    }
}
