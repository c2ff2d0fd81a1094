//! Work/break session timer.
//!
//! Provides the two-phase countdown shown in the overlay:
//! - Work and break phases with fixed durations
//! - Start/pause/reset controls
//! - Automatic pause at every phase boundary

mod format;
mod session;
mod ticker;

pub use format::{describe_seconds, format_seconds_mmss, parse_duration};
pub use session::{Phase, PhaseChange, SessionTimer, TimerState};
pub use ticker::Ticker;
