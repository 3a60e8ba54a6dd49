use chrono::NaiveDate;

use super::BlockStore;
use crate::models::block::{GroupId, TimeBlock, Track};

impl BlockStore {
    /// Blocks of `track` on `date`, in insertion order.
    ///
    /// Multi-day plan instances are left out of the plan track; they are
    /// shown by the week strip instead.
    pub fn filter_by_date(&self, track: Track, date: NaiveDate) -> Vec<TimeBlock> {
        self.blocks(track)
            .iter()
            .filter(|b| b.date == date)
            .filter(|b| track != Track::Plan || !b.is_group_instance())
            .cloned()
            .collect()
    }

    /// Every plan instance belonging to `group_id`, ordered by date.
    pub fn group_blocks(&self, group_id: &GroupId) -> Vec<TimeBlock> {
        let mut blocks: Vec<TimeBlock> = self
            .blocks(Track::Plan)
            .iter()
            .filter(|b| b.group_id.as_ref() == Some(group_id))
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.date);
        blocks
    }

    /// First and last date covered by `group_id`.
    pub fn group_date_range(&self, group_id: &GroupId) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .blocks(Track::Plan)
            .iter()
            .filter(|b| b.group_id.as_ref() == Some(group_id))
            .map(|b| b.date);
        dates.fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
        })
    }
}

pub fn total_minutes(blocks: &[TimeBlock]) -> u32 {
    blocks.iter().map(TimeBlock::duration).sum()
}

/// Summed durations in hours, rendered with one decimal (`"2.2"`).
pub fn total_hours(blocks: &[TimeBlock]) -> String {
    format!("{:.1}", total_minutes(blocks) as f64 / 60.0)
}
