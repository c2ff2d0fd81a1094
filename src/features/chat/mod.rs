//! Chat feed sourced from Twitch IRC or manual test input.
//!
//! - Rolling window of recent messages
//! - Forwarding of prefixed messages to the task list
//! - Anonymous, auto-reconnecting live connection

pub mod client;
mod feed;
pub mod irc;

pub use client::{spawn_chat_worker, ChatClientConfig, ChatEvent, ConnectionStatus};
pub use feed::{ChatFeed, ChatMessage, DEFAULT_CAPACITY};
