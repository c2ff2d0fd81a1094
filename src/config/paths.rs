//! Path resolution for study-overlay configuration and data files.
//!
//! All data is stored in `~/.study-overlay/`:
//! - `config.yaml` - Main configuration file
//! - `overlay.db` - `SQLite` key-value store for the persisted task list
//! - `overlay.log` - Log output (the TUI owns the terminal)

use std::path::PathBuf;

use crate::error::OverlayError;

/// Paths to study-overlay configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.study-overlay/`
    pub root: PathBuf,
    /// Config file: `~/.study-overlay/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.study-overlay/overlay.db`
    pub database: PathBuf,
    /// Log file: `~/.study-overlay/overlay.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, OverlayError> {
        let home = std::env::var("HOME").map_err(|_| {
            OverlayError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".study-overlay")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("overlay.db"),
            log_file: root.join("overlay.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), OverlayError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                OverlayError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".study-overlay")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-overlay");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("overlay.db"));
        assert_eq!(paths.log_file, root.join("overlay.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("overlay"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
