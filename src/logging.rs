//! Tracing subscriber setup.
//!
//! The overlay owns the terminal, so log lines go to
//! `~/.study-overlay/overlay.log`. Filtering follows `RUST_LOG` and
//! defaults to `info`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Paths;

/// Where log output ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Appending to the log file.
    File,
    /// Writing to stderr.
    Stderr,
    /// No subscriber installed.
    Disabled,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// When the log file cannot be opened, non-interactive commands fall back to
/// stderr; the overlay runs without logging rather than draw over its UI.
pub fn init(paths: &Paths, interactive: bool) -> LogTarget {
    let file = paths.ensure_dirs().ok().and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_file)
            .ok()
    });

    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            LogTarget::File
        }
        None if !interactive => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
            LogTarget::Stderr
        }
        None => LogTarget::Disabled,
    }
}
