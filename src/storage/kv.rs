//! Flat key-value persistence.
//!
//! The task list only ever needs `get(key)` and `set(key, value)`, so the
//! storage seam is a small trait with a `SQLite` implementation for real runs
//! and an in-memory one for tests and `--no-persist` sessions.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::OverlayError;

/// A string-keyed, string-valued store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, OverlayError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), OverlayError>;
}

/// Key-value store backed by the `kv` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Create a store over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, OverlayError> {
        self.db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| OverlayError::Database(format!("Failed to read key {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), OverlayError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| OverlayError::Database(format!("Failed to write key {key}: {e}")))?;
        Ok(())
    }
}

/// Volatile store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, OverlayError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), OverlayError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
