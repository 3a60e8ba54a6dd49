//! Side-by-side lane assignment for overlapping blocks.
//!
//! Blocks are sorted by start and swept left to right into clusters: a block
//! joins the current cluster when it overlaps any member, otherwise it opens a
//! new one. Each member's lane is its position in the cluster and every member
//! reports the cluster size as its lane count. This is cluster packing, not
//! minimum interval colouring, and chained overlaps get one lane per block.

use std::collections::HashMap;

use crate::models::block::{BlockId, TimeBlock};

/// Horizontal slot of a block within its overlap cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneInfo {
    pub lane: usize,
    pub total_lanes: usize,
}

impl LaneInfo {
    /// Placement of a block that overlaps nothing.
    pub const SOLO: LaneInfo = LaneInfo {
        lane: 0,
        total_lanes: 1,
    };
}

impl Default for LaneInfo {
    fn default() -> Self {
        Self::SOLO
    }
}

/// Lane assignments for one track on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneMap {
    lanes: HashMap<BlockId, LaneInfo>,
}

impl LaneMap {
    /// Lane for `id`, falling back to a full-width placement.
    pub fn get(&self, id: &BlockId) -> LaneInfo {
        self.lanes.get(id).copied().unwrap_or_default()
    }
}

/// Group blocks into maximal overlap-connected clusters, each sorted by start.
///
/// Ties on `start` keep their input order.
pub fn overlap_clusters(blocks: &[TimeBlock]) -> Vec<Vec<&TimeBlock>> {
    let mut sorted: Vec<&TimeBlock> = blocks.iter().collect();
    sorted.sort_by_key(|block| block.start);

    let mut clusters: Vec<Vec<&TimeBlock>> = Vec::new();
    let mut current: Vec<&TimeBlock> = Vec::new();

    for block in sorted {
        if current.is_empty() || current.iter().any(|member| block.overlaps(member)) {
            current.push(block);
        } else {
            clusters.push(std::mem::take(&mut current));
            current.push(block);
        }
    }
    if !current.is_empty() {
        clusters.push(current);
    }

    clusters
}

/// Assign every block a lane and lane count.
pub fn calculate_lanes(blocks: &[TimeBlock]) -> LaneMap {
    let mut lanes = HashMap::with_capacity(blocks.len());

    for mut cluster in overlap_clusters(blocks) {
        let total_lanes = cluster.len();
        cluster.sort_by_key(|block| block.start);
        for (lane, block) in cluster.into_iter().enumerate() {
            lanes.insert(block.id.clone(), LaneInfo { lane, total_lanes });
        }
    }

    LaneMap { lanes }
}
