//! Output formatting for study-overlay.
//!
//! This module provides formatters for displaying tasks and command
//! interpretations in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::OverlayError;
use crate::features::tasks::{Interpretation, Task};

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `OverlayError::Json` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], format: OutputFormat) -> Result<String, OverlayError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks)),
        OutputFormat::Json => format_tasks_json(tasks),
    }
}

/// Format a message interpretation based on output format
///
/// # Errors
///
/// Returns `OverlayError::Json` if JSON serialization fails.
pub fn format_interpretation(
    interpretation: &Interpretation,
    format: OutputFormat,
) -> Result<String, OverlayError> {
    match format {
        OutputFormat::Pretty => Ok(format_interpretation_pretty(interpretation)),
        OutputFormat::Json => to_json(interpretation),
    }
}
