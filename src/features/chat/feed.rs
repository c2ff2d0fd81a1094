//! Rolling window of recent chat messages.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::features::tasks::{has_prefix, CommandSink};

/// Number of messages kept on screen by default.
pub const DEFAULT_CAPACITY: usize = 20;

/// Username substituted when a message arrives without one.
const ANONYMOUS: &str = "anonymous";

/// A received chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Sender name, never empty.
    pub username: String,
    /// Message text as received.
    pub text: String,
    /// When the message was posted to the feed.
    pub received_at: DateTime<Utc>,
}

/// Fixed-capacity, oldest-evicted-first message buffer.
#[derive(Debug, Clone)]
pub struct ChatFeed {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatFeed {
    /// Create a feed holding at most `capacity` messages (minimum one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a message and forward it to `sink` if it carries the sink's
    /// command prefix.
    ///
    /// Returns whether the message was forwarded.
    pub fn post(&mut self, username: &str, text: &str, sink: &mut dyn CommandSink) -> bool {
        let username = username.trim();
        let username = if username.is_empty() { ANONYMOUS } else { username };

        self.messages.push_back(ChatMessage {
            username: username.to_string(),
            text: text.to_string(),
            received_at: Utc::now(),
        });
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }

        if has_prefix(text, sink.command_prefix()) {
            debug!(username, text, "forwarding chat command");
            sink.interpret_command(text);
            true
        } else {
            false
        }
    }

    /// Messages from oldest to newest.
    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &ChatMessage> + ExactSizeIterator {
        self.messages.iter()
    }

    /// Number of messages currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of messages held.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ChatFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tasks::{Task, TaskList};

    struct RecordingSink {
        prefix: String,
        received: Vec<String>,
    }

    impl RecordingSink {
        fn with_prefix(prefix: &str) -> Self {
            Self {
                prefix: prefix.to_string(),
                received: Vec::new(),
            }
        }
    }

    impl Default for RecordingSink {
        fn default() -> Self {
            Self::with_prefix("!todo")
        }
    }

    impl CommandSink for RecordingSink {
        fn command_prefix(&self) -> &str {
            &self.prefix
        }

        fn interpret_command(&mut self, raw: &str) -> bool {
            self.received.push(raw.to_string());
            true
        }
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut feed = ChatFeed::default();
        let mut sink = RecordingSink::default();

        for i in 1..=21 {
            feed.post("viewer", &format!("message {i}"), &mut sink);
            assert!(feed.len() <= DEFAULT_CAPACITY);
        }

        let texts: Vec<&str> = feed.messages().map(|m| m.text.as_str()).collect();
        let expected: Vec<String> = (2..=21).map(|i| format!("message {i}")).collect();
        assert_eq!(texts, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_prefixed_messages_are_forwarded() {
        let mut feed = ChatFeed::default();
        let mut sink = RecordingSink::default();

        assert!(!feed.post("a", "hello", &mut sink));
        assert!(feed.post("b", "!TODO read", &mut sink));
        assert!(!feed.post("c", "I have a !todo", &mut sink));

        assert_eq!(sink.received, vec!["!TODO read".to_string()]);
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn test_forwarding_follows_sink_prefix() {
        let mut feed = ChatFeed::default();
        let mut sink = RecordingSink::with_prefix("!task");

        assert!(!feed.post("a", "!todo read", &mut sink));
        assert!(feed.post("b", "!task read", &mut sink));

        let mut tasks = TaskList::new("!task");
        feed.post("c", "!task write", &mut tasks);
        feed.post("c", "!todo ignored", &mut tasks);

        assert_eq!(sink.received, vec!["!task read".to_string()]);
        assert_eq!(tasks.tasks(), &[Task::new("write")]);
    }

    #[test]
    fn test_blank_username_falls_back() {
        let mut feed = ChatFeed::default();
        let mut sink = RecordingSink::default();
        feed.post("  ", "hi", &mut sink);

        assert_eq!(feed.messages().next().unwrap().username, "anonymous");
    }

    #[test]
    fn test_post_drives_task_list() {
        let mut feed = ChatFeed::default();
        let mut tasks = TaskList::new("!todo");

        feed.post("viewer", "!todo buy milk", &mut tasks);
        assert_eq!(tasks.tasks(), &[Task::new("buy milk")]);

        feed.post("viewer", "!todo done 1", &mut tasks);
        assert!(tasks.tasks()[0].done);

        feed.post("viewer", "!todo done 1", &mut tasks);
        assert!(!tasks.tasks()[0].done);

        feed.post("viewer", "!todo clear", &mut tasks);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_minimum_capacity() {
        let mut feed = ChatFeed::new(0);
        let mut sink = RecordingSink::default();
        feed.post("a", "one", &mut sink);
        feed.post("a", "two", &mut sink);

        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.messages().next().unwrap().text, "two");
    }
}
