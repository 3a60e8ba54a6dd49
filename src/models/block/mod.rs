// Block module
// Time block model shared by the plan and execution tracks

use std::fmt;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::utils::time_grid::MAX_MINUTES;

/// Longest title accepted by [`TimeBlock::validate`], in characters.
pub const MAX_TITLE_CHARS: usize = 40;
/// Longest description accepted by [`TimeBlock::validate`], in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Stable identifier of a time block. Survives moves between tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier shared by every instance of one multi-day plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two parallel block collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Plan,
    Execution,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Plan, Track::Execution];

    /// The track on the other side of the timeline.
    pub fn other(self) -> Track {
        match self {
            Track::Plan => Track::Execution,
            Track::Execution => Track::Plan,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Track::Plan => "Plan",
            Track::Execution => "Execution",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Track::Plan => 0,
            Track::Execution => 1,
        }
    }
}

/// Palette tokens a block can be painted with.
///
/// Legacy `bg-<name>-200` tokens are accepted when reading persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockColor {
    #[default]
    #[serde(rename = "pink", alias = "bg-pink-200")]
    Pink,
    #[serde(rename = "green", alias = "bg-green-200")]
    Green,
    #[serde(rename = "orange", alias = "bg-orange-200")]
    Orange,
    #[serde(rename = "yellow", alias = "bg-yellow-200")]
    Yellow,
    #[serde(rename = "blue", alias = "bg-blue-200")]
    Blue,
    #[serde(rename = "purple", alias = "bg-purple-200")]
    Purple,
    #[serde(rename = "red", alias = "bg-red-200")]
    Red,
    #[serde(rename = "teal", alias = "bg-teal-200")]
    Teal,
    /// Neutral colour for logged errands; never picked at random.
    #[serde(rename = "gray", alias = "bg-zinc-200")]
    Gray,
}

impl BlockColor {
    /// The random-pick palette.
    pub const ALL: [BlockColor; 8] = [
        BlockColor::Pink,
        BlockColor::Green,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Blue,
        BlockColor::Purple,
        BlockColor::Red,
        BlockColor::Teal,
    ];

    /// Pick a palette colour uniformly at random.
    pub fn random() -> Self {
        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&BlockColor::Pink)
    }

    pub fn token(self) -> &'static str {
        match self {
            BlockColor::Pink => "pink",
            BlockColor::Green => "green",
            BlockColor::Orange => "orange",
            BlockColor::Yellow => "yellow",
            BlockColor::Blue => "blue",
            BlockColor::Purple => "purple",
            BlockColor::Red => "red",
            BlockColor::Teal => "teal",
            BlockColor::Gray => "gray",
        }
    }
}

/// Reasons a block is refused by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("Block title cannot be empty")]
    EmptyTitle,
    #[error("Block title cannot exceed {} characters", MAX_TITLE_CHARS)]
    TitleTooLong,
    #[error("Block description cannot exceed {} characters", MAX_DESCRIPTION_CHARS)]
    DescriptionTooLong,
    #[error("Block end ({end}) must be after start ({start})")]
    InvalidRange { start: u32, end: u32 },
    #[error("Block end ({0}) cannot be past midnight")]
    EndPastMidnight(u32),
}

/// A planned or executed stretch of time on one calendar date.
///
/// `start` and `end` are minutes since midnight; `end` may be exactly 1440.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: BlockId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: u32,
    pub end: u32,
    pub color: BlockColor,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

impl TimeBlock {
    /// Create a validated block with a fresh id and the default colour.
    ///
    /// # Examples
    /// ```
    /// use day_planner::models::block::TimeBlock;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let block = TimeBlock::new("Chemistry", 540, 620, date).unwrap();
    /// assert_eq!(block.duration(), 80);
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: u32,
        end: u32,
        date: NaiveDate,
    ) -> Result<Self, BlockError> {
        let block = Self {
            id: BlockId::generate(),
            title: title.into(),
            description: None,
            start,
            end,
            color: BlockColor::default(),
            date,
            group_id: None,
        };
        block.validate()?;
        Ok(block)
    }

    pub fn builder() -> TimeBlockBuilder {
        TimeBlockBuilder::new()
    }

    pub fn validate(&self) -> Result<(), BlockError> {
        if self.title.trim().is_empty() {
            return Err(BlockError::EmptyTitle);
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(BlockError::TitleTooLong);
        }
        if let Some(ref description) = self.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(BlockError::DescriptionTooLong);
            }
        }
        if self.end <= self.start {
            return Err(BlockError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > MAX_MINUTES {
            return Err(BlockError::EndPastMidnight(self.end));
        }
        Ok(())
    }

    /// Length of the block in minutes.
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Half-open `[start, end)` intersection test.
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn is_group_instance(&self) -> bool {
        self.group_id.is_some()
    }

    pub fn apply_patch(&mut self, patch: &BlockPatch) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial update merged into one block or every instance of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub color: Option<BlockColor>,
}

impl BlockPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description; blank text clears it.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = Some((!description.is_empty()).then_some(description));
        self
    }

    pub fn times(mut self, start: u32, end: u32) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn color(mut self, color: BlockColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Builder for blocks with optional fields.
pub struct TimeBlockBuilder {
    id: Option<BlockId>,
    title: Option<String>,
    description: Option<String>,
    start: Option<u32>,
    end: Option<u32>,
    color: BlockColor,
    date: Option<NaiveDate>,
    group_id: Option<GroupId>,
}

impl TimeBlockBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            start: None,
            end: None,
            color: BlockColor::default(),
            date: None,
            group_id: None,
        }
    }

    /// Use a fixed id instead of generating one.
    pub fn id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn times(mut self, start: u32, end: u32) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn color(mut self, color: BlockColor) -> Self {
        self.color = color;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn build(self) -> Result<TimeBlock, BlockError> {
        let block = TimeBlock {
            id: self.id.unwrap_or_else(BlockId::generate),
            title: self.title.unwrap_or_default(),
            description: self.description.filter(|d| !d.is_empty()),
            start: self.start.unwrap_or(0),
            end: self.end.unwrap_or(0),
            color: self.color,
            date: self.date.unwrap_or_default(),
            group_id: self.group_id,
        };
        block.validate()?;
        Ok(block)
    }
}

impl Default for TimeBlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
