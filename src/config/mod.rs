//! Configuration management for study-overlay.
//!
//! This module handles loading and saving configuration from `~/.study-overlay/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ChatConfig, Config, TasksConfig, TimerConfig};
