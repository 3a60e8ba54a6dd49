use chrono::NaiveDate;

use super::BlockStore;
use crate::models::block::{BlockError, BlockId, BlockPatch, GroupId, TimeBlock, Track};
use crate::utils::date::dates_in_range;

impl BlockStore {
    /// Append a block to `track`.
    ///
    /// Invalid blocks are refused without touching the store. A block whose id
    /// is already taken is given a fresh one.
    pub fn add(&mut self, track: Track, mut block: TimeBlock) -> Result<BlockId, BlockError> {
        if let Err(err) = block.validate() {
            log::warn!("Refusing to add block '{}': {}", block.title, err);
            return Err(err);
        }
        if self.locate(&block.id).is_some() {
            block.id = BlockId::generate();
        }

        let id = block.id.clone();
        log::debug!("Adding block {} to {:?} on {}", id, track, block.date);
        self.track_mut(track).push(block);
        self.touch();
        Ok(id)
    }

    /// Create one plan block per date from `start_date` to `end_date`
    /// inclusive, all sharing a fresh group id.
    ///
    /// When `end_date` is not after `start_date` this is a plain [`add`] of
    /// the template on `start_date`.
    ///
    /// [`add`]: BlockStore::add
    pub fn add_multi_day(
        &mut self,
        template: TimeBlock,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<BlockId>, BlockError> {
        if end_date <= start_date {
            let single = TimeBlock {
                date: start_date,
                group_id: None,
                ..template
            };
            return self.add(Track::Plan, single).map(|id| vec![id]);
        }

        if let Err(err) = template.validate() {
            log::warn!("Refusing multi-day plan '{}': {}", template.title, err);
            return Err(err);
        }

        let group_id = GroupId::generate();
        let instances: Vec<TimeBlock> = dates_in_range(start_date, end_date)
            .into_iter()
            .map(|date| TimeBlock {
                id: BlockId::generate(),
                date,
                group_id: Some(group_id.clone()),
                ..template.clone()
            })
            .collect();
        let ids = instances.iter().map(|b| b.id.clone()).collect();

        log::debug!(
            "Adding multi-day plan {} ({} instances, {} to {})",
            group_id,
            instances.len(),
            start_date,
            end_date
        );
        self.track_mut(Track::Plan).extend(instances);
        self.touch();
        Ok(ids)
    }

    /// Merge `patch` into the block `id` of `track`.
    ///
    /// Returns `Ok(false)` when no such block exists. A patch that would leave
    /// the block invalid is refused and nothing changes.
    pub fn update(
        &mut self,
        track: Track,
        id: &BlockId,
        patch: &BlockPatch,
    ) -> Result<bool, BlockError> {
        let Some(existing) = self.track_mut(track).iter_mut().find(|b| &b.id == id) else {
            return Ok(false);
        };

        let mut patched = existing.clone();
        patched.apply_patch(patch);
        patched.validate()?;

        if *existing != patched {
            *existing = patched;
            self.touch();
        }
        Ok(true)
    }

    /// Delete the block `id` from `track`.
    pub fn remove(&mut self, track: Track, id: &BlockId) -> bool {
        let blocks = self.track_mut(track);
        let before = blocks.len();
        blocks.retain(|b| &b.id != id);
        let removed = blocks.len() != before;
        if removed {
            log::debug!("Removed block {} from {:?}", id, track);
            self.touch();
        }
        removed
    }

    /// Move the block `id` from `from` to `to` with new times, keeping its id
    /// and every other field.
    ///
    /// If the block already sits in `to` (a repeated move event) only its
    /// times are patched, so a block is never inserted twice.
    pub fn move_across_tracks(
        &mut self,
        from: Track,
        id: &BlockId,
        to: Track,
        new_start: u32,
        new_end: u32,
    ) -> Result<bool, BlockError> {
        let times = BlockPatch::new().times(new_start, new_end);
        if from == to || self.get(to, id).is_some() {
            return self.update(to, id, &times);
        }

        let Some(position) = self.blocks(from).iter().position(|b| &b.id == id) else {
            return Ok(false);
        };

        let mut moved = self.blocks(from)[position].clone();
        moved.apply_patch(&times);
        moved.validate()?;

        self.track_mut(from).remove(position);
        log::debug!("Moved block {} from {:?} to {:?}", id, from, to);
        self.track_mut(to).push(moved);
        self.touch();
        Ok(true)
    }
}
