//! Storage layer for study-overlay.
//!
//! `SQLite` persistence for the task list, exposed through the
//! [`KeyValueStore`] seam.

mod database;
mod kv;
mod migrations;

pub use database::Database;
#[cfg(test)]
pub use kv::MockKeyValueStore;
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
