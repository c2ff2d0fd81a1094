//! `SQLite` database connection.
//!
//! The database is stored at `~/.study-overlay/overlay.db` and holds a single
//! key-value table used to persist the task list between restarts.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::OverlayError;

use super::migrations;

/// Migrated database connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, OverlayError> {
        let conn = Connection::open(path).map_err(|e| {
            OverlayError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "task database opened");
        Self::prepare(conn)
    }

    /// Open a throwaway database.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` cannot allocate it or migrations fail.
    pub fn open_in_memory() -> Result<Self, OverlayError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, OverlayError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, OverlayError> {
        migrations::get_version(&self.conn)
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_is_migrated() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("overlay.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES ('todos', '[]', 'now')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        let value: String = db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = 'todos'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "[]");
        assert_eq!(db.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("overlay.db");

        let err = Database::open_at(&db_path).err().unwrap();
        assert!(matches!(err, OverlayError::Database(_)));
    }
}
