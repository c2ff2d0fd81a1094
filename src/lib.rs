//! study-overlay - A terminal overlay for study streams
//!
//! This crate provides a work/break session timer, a task list that viewers
//! drive with chat commands, and a live Twitch chat feed, shown together in
//! a full-screen terminal UI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::OverlayError;
