use chrono::NaiveDate;
use egui::{Pos2, Rect};

use super::EditorRequest;

/// Result of releasing the pointer over the week strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeOutcome {
    /// A single cell was pressed and released.
    Navigate(NaiveDate),
    CreateMultiDay(EditorRequest),
}

/// Press-and-sweep over the seven day cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeController {
    selecting: Option<(usize, usize)>,
}

impl DateRangeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.selecting.is_some()
    }

    pub fn begin(&mut self, index: usize) {
        if index < 7 {
            self.selecting = Some((index, index));
        }
    }

    /// Move the sweep end to the cell under the pointer, if any.
    pub fn update(&mut self, hovered: Option<usize>) {
        if let (Some((_, current)), Some(index)) = (self.selecting.as_mut(), hovered) {
            if index < 7 {
                *current = index;
            }
        }
    }

    /// Inclusive `(min, max)` weekday indices being swept.
    pub fn highlighted(&self) -> Option<(usize, usize)> {
        self.selecting
            .map(|(start, current)| (start.min(current), start.max(current)))
    }

    pub fn finish(&mut self, week: &[NaiveDate; 7]) -> Option<DateRangeOutcome> {
        let (lo, hi) = self.highlighted()?;
        self.selecting = None;

        if lo == hi {
            return Some(DateRangeOutcome::Navigate(week[lo]));
        }
        Some(DateRangeOutcome::CreateMultiDay(EditorRequest::new_multi_day(
            week[lo], week[hi],
        )))
    }
}

/// Index of the day cell containing `pointer`.
pub fn hit_test(cells: &[Rect], pointer: Pos2) -> Option<usize> {
    cells.iter().position(|cell| cell.contains(pointer))
}
