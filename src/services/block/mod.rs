//! Block store entry point.
//! Owns the plan and execution collections and the header message; the
//! operations are split across focused submodules.

use crate::models::block::{BlockId, TimeBlock, Track};

pub mod crud;
pub mod group;
pub mod queries;

pub use queries::{total_hours, total_minutes};

/// The two ordered block collections plus the header message.
///
/// Every mutation goes through the store's operations and bumps
/// [`BlockStore::revision`], which callers use to decide when to persist.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    tracks: [Vec<TimeBlock>; 2],
    top_message: String,
    revision: u64,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted collections.
    ///
    /// Duplicate ids are dropped (first occurrence wins) so an id lives in at
    /// most one track.
    pub fn from_parts(
        plan: Vec<TimeBlock>,
        execution: Vec<TimeBlock>,
        top_message: impl Into<String>,
    ) -> Self {
        let mut store = Self {
            tracks: [Vec::with_capacity(plan.len()), Vec::with_capacity(execution.len())],
            top_message: top_message.into(),
            revision: 0,
        };
        for (track, blocks) in [(Track::Plan, plan), (Track::Execution, execution)] {
            for block in blocks {
                if store.locate(&block.id).is_some() {
                    log::warn!("Dropping duplicate block id {} while loading", block.id);
                    continue;
                }
                store.tracks[track.index()].push(block);
            }
        }
        store
    }

    /// Blocks of one track in insertion order.
    pub fn blocks(&self, track: Track) -> &[TimeBlock] {
        &self.tracks[track.index()]
    }

    pub fn top_message(&self) -> &str {
        &self.top_message
    }

    /// Replace the header message with `text` trimmed. Blank text is ignored.
    pub fn set_top_message(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if trimmed != self.top_message {
            self.top_message = trimmed.to_string();
            self.touch();
        }
        true
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Track currently holding `id`.
    pub fn locate(&self, id: &BlockId) -> Option<Track> {
        Track::ALL
            .into_iter()
            .find(|track| self.tracks[track.index()].iter().any(|b| &b.id == id))
    }

    pub fn get(&self, track: Track, id: &BlockId) -> Option<&TimeBlock> {
        self.tracks[track.index()].iter().find(|b| &b.id == id)
    }

    pub(crate) fn track_mut(&mut self, track: Track) -> &mut Vec<TimeBlock> {
        &mut self.tracks[track.index()]
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn block(id: &str) -> TimeBlock {
        TimeBlock::builder()
            .id(id)
            .title("Study")
            .times(540, 600)
            .date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_parts_keeps_order_and_drops_duplicates() {
        let store = BlockStore::from_parts(
            vec![block("p1"), block("p2")],
            vec![block("e1"), block("p1")],
            "Go",
        );
        let plan: Vec<&str> = store.blocks(Track::Plan).iter().map(|b| b.id.as_str()).collect();
        let exec: Vec<&str> = store
            .blocks(Track::Execution)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(plan, vec!["p1", "p2"]);
        assert_eq!(exec, vec!["e1"]);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_locate() {
        let store = BlockStore::from_parts(vec![block("p1")], vec![block("e1")], "");
        assert_eq!(store.locate(&"p1".into()), Some(Track::Plan));
        assert_eq!(store.locate(&"e1".into()), Some(Track::Execution));
        assert_eq!(store.locate(&"zz".into()), None);
    }

    #[test]
    fn test_set_top_message_trims_and_ignores_blank() {
        let mut store = BlockStore::from_parts(vec![], vec![], "Keep going!");
        assert!(!store.set_top_message("   "));
        assert_eq!(store.top_message(), "Keep going!");
        assert_eq!(store.revision(), 0);

        assert!(store.set_top_message("  Exam week  "));
        assert_eq!(store.top_message(), "Exam week");
        assert_eq!(store.revision(), 1);
    }
}
