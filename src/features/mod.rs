//! The three overlay widgets.
//!
//! - Session timer (work/break countdown)
//! - Task list with chat command grammar
//! - Chat feed with live Twitch connection

pub mod chat;
pub mod tasks;
pub mod timer;
