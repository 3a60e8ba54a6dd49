//! Persistence of the planner state as a handful of key-value entries.
//!
//! Each block list is stored as a JSON array under its own key and the header
//! message as plain text. Loading is per key and never fails: a missing key
//! keeps the built-in default and an unreadable one is logged and skipped.

use anyhow::Result;
use thiserror::Error;

mod defaults;
mod memory;
mod snapshot;
mod sqlite;

pub use defaults::{default_execution_blocks, default_plan_blocks};
pub use memory::MemoryKeyValueStore;
pub use snapshot::PlannerSnapshot;
pub use sqlite::SqliteKeyValueStore;

pub const PLAN_BLOCKS_KEY: &str = "planner_planBlocks";
pub const EXECUTION_BLOCKS_KEY: &str = "planner_executionBlocks";
pub const TOP_MESSAGE_KEY: &str = "planner_topMessage";

/// String key-value backend the snapshot is read from and written to.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Stored value for '{key}' could not be decoded")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode value for '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
