use chrono::NaiveDate;

use crate::models::block::{BlockColor, BlockError, BlockId, BlockPatch, GroupId, TimeBlock, Track};
use crate::services::block::BlockStore;

/// Default time of day for a new multi-day plan.
pub const MULTI_DAY_DEFAULT_START: u32 = 9 * 60;
pub const MULTI_DAY_DEFAULT_END: u32 = 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
}

/// What an edit-mode request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTarget {
    Block(BlockId),
    Group(GroupId),
}

/// Form state handed to the editor window and written back on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRequest {
    pub mode: EditorMode,
    pub track: Track,
    /// Set for [`EditorMode::Edit`] only.
    pub target: Option<EditorTarget>,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub title: String,
    pub description: String,
    pub color: BlockColor,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_multi_day: bool,
}

impl EditorRequest {
    /// Blank add-mode form for a range picked on a timeline.
    pub fn new_block(track: Track, start_minutes: u32, end_minutes: u32, date: NaiveDate) -> Self {
        Self {
            mode: EditorMode::Add,
            track,
            target: None,
            start_minutes,
            end_minutes,
            title: String::new(),
            description: String::new(),
            color: BlockColor::random(),
            start_date: date,
            end_date: date,
            is_multi_day: false,
        }
    }

    /// Blank add-mode form for a plan spanning `start_date..=end_date`.
    pub fn new_multi_day(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            end_date,
            is_multi_day: true,
            ..Self::new_block(
                Track::Plan,
                MULTI_DAY_DEFAULT_START,
                MULTI_DAY_DEFAULT_END,
                start_date,
            )
        }
    }

    pub fn for_block(track: Track, block: &TimeBlock) -> Self {
        Self {
            mode: EditorMode::Edit,
            track,
            target: Some(EditorTarget::Block(block.id.clone())),
            start_minutes: block.start,
            end_minutes: block.end,
            title: block.title.clone(),
            description: block.description.clone().unwrap_or_default(),
            color: block.color,
            start_date: block.date,
            end_date: block.date,
            is_multi_day: false,
        }
    }

    /// Edit form for a whole group, seeded from its first instance and
    /// spanning its earliest to latest date.
    pub fn for_group(store: &BlockStore, group_id: &GroupId) -> Option<Self> {
        let first = store
            .blocks(Track::Plan)
            .iter()
            .find(|b| b.group_id.as_ref() == Some(group_id))?;
        let (start_date, end_date) = store.group_date_range(group_id)?;

        Some(Self {
            mode: EditorMode::Edit,
            track: Track::Plan,
            target: Some(EditorTarget::Group(group_id.clone())),
            start_minutes: first.start,
            end_minutes: first.end,
            title: first.title.clone(),
            description: first.description.clone().unwrap_or_default(),
            color: first.color,
            start_date,
            end_date,
            is_multi_day: true,
        })
    }

    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn can_delete(&self) -> bool {
        self.mode == EditorMode::Edit && self.target.is_some()
    }

    fn patch(&self) -> BlockPatch {
        BlockPatch::new()
            .title(self.title.trim())
            .description(self.description.as_str())
            .times(self.start_minutes, self.end_minutes)
            .color(self.color)
    }

    fn template(&self) -> Result<TimeBlock, BlockError> {
        TimeBlock::builder()
            .title(self.title.trim())
            .description(self.description.as_str())
            .times(self.start_minutes, self.end_minutes)
            .color(self.color)
            .date(self.start_date)
            .build()
    }

    /// Write the form back into `store`.
    ///
    /// Returns `Ok(false)` when an edit target no longer exists. A blank
    /// title or bad time range is refused and leaves the store untouched.
    pub fn apply(&self, store: &mut BlockStore) -> Result<bool, BlockError> {
        if !self.can_save() {
            return Err(BlockError::EmptyTitle);
        }

        match (&self.mode, &self.target) {
            (EditorMode::Edit, Some(EditorTarget::Block(id))) => {
                store.update(self.track, id, &self.patch())
            }
            (EditorMode::Edit, Some(EditorTarget::Group(group_id))) => {
                store.update_group(group_id, &self.patch()).map(|n| n > 0)
            }
            (EditorMode::Edit, None) => Ok(false),
            (EditorMode::Add, _) => {
                let template = self.template()?;
                if self.track == Track::Plan && self.is_multi_day {
                    store.add_multi_day(template, self.start_date, self.end_date)?;
                } else {
                    store.add(self.track, template)?;
                }
                Ok(true)
            }
        }
    }

    /// Remove the edited block or group.
    pub fn delete(&self, store: &mut BlockStore) -> bool {
        match (&self.mode, &self.target) {
            (EditorMode::Edit, Some(EditorTarget::Block(id))) => store.remove(self.track, id),
            (EditorMode::Edit, Some(EditorTarget::Group(group_id))) => {
                store.remove_group(group_id) > 0
            }
            _ => false,
        }
    }
}
