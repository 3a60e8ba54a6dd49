// Database service module
// SQLite connection and key-value schema

mod connection;
mod schema;

pub use connection::Database;
pub use schema::KV_TABLE;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("planner.db");

        let result = Database::open(&db_path);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(&db_path).exists(), "Database file should exist");
    }

    #[test]
    fn test_kv_table_exists_after_init() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [KV_TABLE],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "kv_store table should exist");
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        assert!(db.initialize_schema().is_ok());
    }
}
