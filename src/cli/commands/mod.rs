//! Command implementations for study-overlay.
//!
//! Each handler returns the text to print; the overlay itself prints nothing.

mod completions;
mod config;
mod overlay;
mod parse;
mod tasks;

pub use completions::completions;
pub use config::config;
pub use overlay::{overlay, overlay_settings};
pub use parse::parse;
pub use tasks::tasks;

use crate::config::Paths;
use crate::error::OverlayError;
use crate::features::tasks::TaskList;
use crate::storage::{Database, SqliteStore};

/// Open the persisted task list.
///
/// # Errors
///
/// Returns an error if the data directory or database cannot be opened.
pub fn open_task_list(paths: &Paths, prefix: &str) -> Result<TaskList, OverlayError> {
    paths.ensure_dirs()?;
    let db = Database::open_at(&paths.database)?;
    Ok(TaskList::with_store(prefix, Box::new(SqliteStore::with_database(db))))
}
