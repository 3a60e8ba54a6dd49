use super::BlockStore;
use crate::models::block::{BlockError, BlockPatch, GroupId, Track};

impl BlockStore {
    /// Apply `patch` to every instance of `group_id`, in any track.
    ///
    /// All instances are checked first; if any would become invalid none are
    /// changed. Returns how many instances were found.
    pub fn update_group(&mut self, group_id: &GroupId, patch: &BlockPatch) -> Result<usize, BlockError> {
        let mut staged = Vec::new();
        for track in Track::ALL {
            for (index, block) in self.blocks(track).iter().enumerate() {
                if block.group_id.as_ref() != Some(group_id) {
                    continue;
                }
                let mut patched = block.clone();
                patched.apply_patch(patch);
                if let Err(err) = patched.validate() {
                    log::warn!("Refusing group update for {}: {}", group_id, err);
                    return Err(err);
                }
                staged.push((track, index, patched));
            }
        }

        let count = staged.len();
        let mut changed = false;
        for (track, index, patched) in staged {
            let slot = &mut self.track_mut(track)[index];
            if *slot != patched {
                *slot = patched;
                changed = true;
            }
        }
        if changed {
            log::debug!("Updated {} instances of group {}", count, group_id);
            self.touch();
        }
        Ok(count)
    }

    /// Delete every instance of `group_id`, in any track.
    pub fn remove_group(&mut self, group_id: &GroupId) -> usize {
        let mut removed = 0;
        for track in Track::ALL {
            let blocks = self.track_mut(track);
            let before = blocks.len();
            blocks.retain(|b| b.group_id.as_ref() != Some(group_id));
            removed += before - blocks.len();
        }
        if removed > 0 {
            log::debug!("Removed {} instances of group {}", removed, group_id);
            self.touch();
        }
        removed
    }
}
