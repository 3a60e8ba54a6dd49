use anyhow::Result;
use chrono::NaiveDate;

use super::{
    default_execution_blocks, default_plan_blocks, KeyValueStore, StorageError,
    EXECUTION_BLOCKS_KEY, PLAN_BLOCKS_KEY, TOP_MESSAGE_KEY,
};
use crate::models::block::{TimeBlock, Track};
use crate::services::block::BlockStore;

/// Everything the planner persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSnapshot {
    pub plan_blocks: Vec<TimeBlock>,
    pub execution_blocks: Vec<TimeBlock>,
    pub top_message: String,
}

impl PlannerSnapshot {
    /// Built-in first-launch state.
    pub fn defaults(today: NaiveDate, top_message: &str) -> Self {
        Self {
            plan_blocks: default_plan_blocks(today),
            execution_blocks: default_execution_blocks(today),
            top_message: top_message.to_string(),
        }
    }

    pub fn from_store(store: &BlockStore) -> Self {
        Self {
            plan_blocks: store.blocks(Track::Plan).to_vec(),
            execution_blocks: store.blocks(Track::Execution).to_vec(),
            top_message: store.top_message().to_string(),
        }
    }

    pub fn into_store(self) -> BlockStore {
        BlockStore::from_parts(self.plan_blocks, self.execution_blocks, self.top_message)
    }

    /// Overlay whatever `kv` holds on top of `fallback`, key by key.
    pub fn hydrate(kv: &dyn KeyValueStore, fallback: PlannerSnapshot) -> Self {
        let PlannerSnapshot {
            plan_blocks,
            execution_blocks,
            top_message,
        } = fallback;

        let plan_blocks = load_blocks(kv, PLAN_BLOCKS_KEY).unwrap_or(plan_blocks);
        let execution_blocks = load_blocks(kv, EXECUTION_BLOCKS_KEY).unwrap_or(execution_blocks);
        let top_message = match kv.get(TOP_MESSAGE_KEY) {
            Ok(Some(message)) if !message.trim().is_empty() => message,
            Ok(_) => top_message,
            Err(e) => {
                log::error!("Failed to load top message: {:#}", e);
                top_message
            }
        };

        Self {
            plan_blocks,
            execution_blocks,
            top_message,
        }
    }

    /// Write every key, stopping at the first failure.
    pub fn persist(&self, kv: &mut dyn KeyValueStore) -> Result<()> {
        kv.set(PLAN_BLOCKS_KEY, &encode(PLAN_BLOCKS_KEY, &self.plan_blocks)?)?;
        kv.set(
            EXECUTION_BLOCKS_KEY,
            &encode(EXECUTION_BLOCKS_KEY, &self.execution_blocks)?,
        )?;
        kv.set(TOP_MESSAGE_KEY, &self.top_message)?;
        Ok(())
    }
}

fn encode(key: &str, blocks: &[TimeBlock]) -> Result<String, StorageError> {
    serde_json::to_string(blocks).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

fn decode(key: &str, raw: &str) -> Result<Vec<TimeBlock>, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })
}

fn load_blocks(kv: &dyn KeyValueStore, key: &str) -> Option<Vec<TimeBlock>> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::error!("Failed to read {}: {:#}", key, e);
            return None;
        }
    };

    match decode(key, &raw) {
        Ok(blocks) => {
            let (valid, invalid): (Vec<_>, Vec<_>) =
                blocks.into_iter().partition(|b| b.validate().is_ok());
            if !invalid.is_empty() {
                log::warn!("Skipped {} invalid blocks under {}", invalid.len(), key);
            }
            Some(valid)
        }
        Err(e) => {
            log::warn!("{:#}; using defaults", anyhow::Error::new(e));
            None
        }
    }
}
