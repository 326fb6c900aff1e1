//! SQLite schema for the slot table
//!
//! The SQLite backend stores each slot as one row; the encoded value is the
//! same JSON the file backend writes.

use rusqlite::{Connection, OptionalExtension, Result};

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
    -- Schema version tracking
    CREATE TABLE IF NOT EXISTS schema_info (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- One row per slot
    CREATE TABLE IF NOT EXISTS slots (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );
"#;

/// Create the tables and stamp the schema version
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    conn.execute(
        "INSERT INTO schema_info (key, value) VALUES ('version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

/// Stored schema version, `None` when never stamped or unparseable
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM schema_info WHERE key = 'version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(raw.and_then(|v| v.parse().ok()))
}

/// Whether `init_schema` has to run before the slot table can be used
pub fn needs_init(conn: &Connection) -> bool {
    // A missing schema_info table surfaces as an error here.
    !matches!(get_schema_version(conn), Ok(Some(v)) if v >= SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>>>()
            .unwrap();
        names
    }

    #[test]
    fn test_fresh_database_needs_init() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(needs_init(&conn));

        init_schema(&conn).unwrap();

        assert_eq!(table_names(&conn), vec!["schema_info", "slots"]);
        assert_eq!(get_schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
        assert!(!needs_init(&conn));
    }

    #[test]
    fn test_init_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert!(!needs_init(&conn));
    }

    #[test]
    fn test_garbage_version_needs_init() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute("UPDATE schema_info SET value = 'v?' WHERE key = 'version'", [])
            .unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), None);
        assert!(needs_init(&conn));
    }
}
