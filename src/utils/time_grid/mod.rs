//! Time-grid geometry for the 24-hour timeline.
//!
//! Pure functions mapping between minute offsets, 10-minute slot indices
//! and pixel positions. Every function clamps instead of failing.

use chrono::{NaiveTime, Timelike};

use crate::models::block::TimeBlock;
use crate::services::lanes::LaneInfo;

/// Minutes covered by one slot.
pub const SLOT_MINUTES: u32 = 10;
/// Slots in one day (24 * 6).
pub const TOTAL_SLOTS: u32 = 144;
/// Minutes in one day; the only legal value of `end` that is not a slot start.
pub const MAX_MINUTES: u32 = 24 * 60;

/// Slot under a vertical pixel offset measured from the top of a track.
pub fn slot_from_pixel_offset(pixel_y: f32, slot_height_px: f32) -> u32 {
    if slot_height_px.is_nan() || slot_height_px <= 0.0 || !pixel_y.is_finite() {
        return 0;
    }
    let raw = (pixel_y / slot_height_px).floor();
    raw.clamp(0.0, (TOTAL_SLOTS - 1) as f32) as u32
}

pub fn minutes_from_slot(slot: u32) -> u32 {
    slot * SLOT_MINUTES
}

/// Render minutes since midnight as `HH:MM`, with the end of day as `24:00`.
pub fn format_clock(minutes: u32) -> String {
    if minutes >= MAX_MINUTES {
        return "24:00".to_string();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Half-open slot range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: u32,
    pub end: u32,
}

impl SlotRange {
    pub fn start_minutes(&self) -> u32 {
        minutes_from_slot(self.start)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_from_slot(self.end)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes().saturating_sub(self.start_minutes())
    }
}

/// Normalise an anchor/current slot pair into the range a selection covers.
pub fn selection_preview(start_slot: u32, current_slot: u32) -> SlotRange {
    SlotRange {
        start: start_slot.min(current_slot),
        end: start_slot.max(current_slot) + 1,
    }
}

/// Style of the line drawn under a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    Hour,
    HalfHour,
    Regular,
}

impl GridLineKind {
    /// Lines sit at the bottom of each slot, so slot 5 closes the first hour.
    pub fn for_slot(index: u32) -> Self {
        let slot_end = (index + 1) * SLOT_MINUTES;
        if slot_end % 60 == 0 {
            GridLineKind::Hour
        } else if slot_end % 30 == 0 {
            GridLineKind::HalfHour
        } else {
            GridLineKind::Regular
        }
    }
}

/// Placement of a block inside its track, in pixels vertically and in
/// percent of the track width horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top: f32,
    pub height: f32,
    pub left_percent: f32,
    pub width_percent: f32,
}

impl BlockGeometry {
    pub fn compute(
        block: &TimeBlock,
        lane: LaneInfo,
        slot_height_px: f32,
        max_width_percent: f32,
    ) -> Self {
        let total_lanes = lane.total_lanes.max(1) as f32;
        let width_percent = max_width_percent / total_lanes;
        Self {
            top: block.start as f32 / SLOT_MINUTES as f32 * slot_height_px,
            height: block.duration() as f32 / SLOT_MINUTES as f32 * slot_height_px,
            left_percent: lane.lane as f32 * width_percent,
            width_percent,
        }
    }
}

/// Minute values offered by the editor's time pickers.
pub fn time_options(include_end_of_day: bool) -> Vec<u32> {
    let count = if include_end_of_day {
        TOTAL_SLOTS + 1
    } else {
        TOTAL_SLOTS
    };
    (0..count).map(minutes_from_slot).collect()
}

/// Vertical position of the current-time line.
pub fn now_indicator_offset(minutes: u32, slot_height_px: f32) -> f32 {
    minutes as f32 / SLOT_MINUTES as f32 * slot_height_px
}

/// Initial scroll so the current time sits `margin_px` below the viewport top.
pub fn initial_scroll_offset(minutes: u32, slot_height_px: f32, margin_px: f32) -> f32 {
    (now_indicator_offset(minutes, slot_height_px) - margin_px).max(0.0)
}
