//! SQLite slot backend
//!
//! Keeps every slot in a single `slots` table so one database file holds the
//! whole notekeep state. A rusqlite `Connection` is not `Sync`, so it sits
//! behind a mutex to satisfy `KeyValueBackend`.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::backend::KeyValueBackend;
use super::error::{StorageError, StorageResult};
use super::schema::{init_schema, needs_init};

/// Slot storage in a SQLite database
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        if needs_init(&conn) {
            init_schema(&conn)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> StorageResult<T> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        Ok(f(&conn)?)
    }
}

impl KeyValueBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let now = Utc::now().timestamp_millis();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.with_conn(|conn| conn.execute("DELETE FROM slots WHERE key = ?1", [key]).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sqlite_roundtrip() {
        let backend = SqliteBackend::open_in_memory().unwrap();

        assert!(backend.get("notes").unwrap().is_none());

        backend.set("notes", "[]").unwrap();
        backend.set("notes", "[1]").unwrap();
        assert_eq!(backend.get("notes").unwrap().as_deref(), Some("[1]"));

        backend.remove("notes").unwrap();
        assert!(backend.get("notes").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("notekeep.db");

        {
            let backend = SqliteBackend::open(&path).unwrap();
            backend.set("isPro", "true").unwrap();
        }

        let backend = SqliteBackend::open(&path).unwrap();
        assert_eq!(backend.get("isPro").unwrap().as_deref(), Some("true"));
    }
}
