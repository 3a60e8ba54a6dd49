//! Week-strip spans for multi-day plans.

use chrono::NaiveDate;

use crate::models::block::{BlockColor, GroupId, TimeBlock};

/// One multi-day plan as drawn across the seven-day strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiDaySpan {
    pub group_id: GroupId,
    pub title: String,
    pub color: BlockColor,
    /// Weekday index (0 = Sunday) of the first visible instance.
    pub start_idx: usize,
    /// Weekday index of the last visible instance, inclusive.
    pub end_idx: usize,
}

impl MultiDaySpan {
    pub fn day_count(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }
}

/// Collapse grouped plan blocks into one span per group visible in `week`.
///
/// Spans come out in the order each group first appears in `plan_blocks`,
/// and take their title and colour from that first member even when it lies
/// outside the week. Gaps inside a group are bridged, so only the min and max
/// visible weekday matter.
pub fn weekly_spans(plan_blocks: &[TimeBlock], week: &[NaiveDate; 7]) -> Vec<MultiDaySpan> {
    let mut groups: Vec<(&TimeBlock, Option<(usize, usize)>)> = Vec::new();

    for block in plan_blocks {
        let Some(group_id) = block.group_id.as_ref() else {
            continue;
        };
        let position = groups
            .iter()
            .position(|(first, _)| first.group_id.as_ref() == Some(group_id));
        let entry = match position {
            Some(i) => &mut groups[i],
            None => {
                groups.push((block, None));
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };

        if let Some(idx) = week.iter().position(|d| *d == block.date) {
            entry.1 = Some(match entry.1 {
                Some((lo, hi)) => (lo.min(idx), hi.max(idx)),
                None => (idx, idx),
            });
        }
    }

    groups
        .into_iter()
        .filter_map(|(first, range)| {
            let (start_idx, end_idx) = range?;
            Some(MultiDaySpan {
                group_id: first.group_id.clone()?,
                title: first.title.clone(),
                color: first.color,
                start_idx,
                end_idx,
            })
        })
        .collect()
}

/// Spans to draw: all of them when expanded, otherwise the first `limit`.
pub fn visible_spans(spans: &[MultiDaySpan], expanded: bool, limit: usize) -> &[MultiDaySpan] {
    if expanded {
        spans
    } else {
        &spans[..spans.len().min(limit)]
    }
}

/// Number of spans hidden while collapsed.
pub fn hidden_span_count(spans: &[MultiDaySpan], limit: usize) -> usize {
    spans.len().saturating_sub(limit)
}
