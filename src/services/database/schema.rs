use anyhow::{Context, Result};
use rusqlite::Connection;

pub const KV_TABLE: &str = "kv_store";

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_kv_table(conn)?;
    Ok(())
}

fn create_kv_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create kv_store table")?;
    Ok(())
}
