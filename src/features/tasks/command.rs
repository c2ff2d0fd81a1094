//! Chat command grammar for the task list.
//!
//! Recognized shapes, with `!todo` as the default prefix:
//! - `!todo <text>` adds a task
//! - `!todo done <n>` toggles task `n` (1-based)
//! - `!todo delete <n>` removes task `n` (1-based)
//! - `!todo clear` removes every task
//!
//! The words `done`, `delete` and `clear` are reserved: when one of them is
//! the first word after the prefix the message is always read as that
//! subcommand, never as task text.

use serde::Serialize;

/// A parsed task-list instruction. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "value", rename_all = "lowercase")]
pub enum TaskCommand {
    /// Append a task with this text.
    Add(String),
    /// Toggle the done flag of the task at this index.
    Done(usize),
    /// Remove the task at this index.
    Delete(usize),
    /// Remove all tasks.
    Clear,
}

impl std::fmt::Display for TaskCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add(text) => write!(f, "add \"{text}\""),
            Self::Done(index) => write!(f, "toggle done on task {}", index + 1),
            Self::Delete(index) => write!(f, "delete task {}", index + 1),
            Self::Clear => write!(f, "clear all tasks"),
        }
    }
}

/// Something that accepts raw command messages.
///
/// The chat feed forwards prefixed messages through this seam so it never
/// needs to know the concrete task list.
pub trait CommandSink {
    /// Prefix that marks a message as a command for this sink.
    fn command_prefix(&self) -> &str;

    /// Interpret a raw chat message. Returns whether anything changed.
    fn interpret_command(&mut self, raw: &str) -> bool;
}

/// Check whether `text` begins with `prefix`, ignoring ASCII case.
///
/// An empty prefix never matches.
#[must_use]
pub fn has_prefix(text: &str, prefix: &str) -> bool {
    strip_prefix_ignore_case(text.trim_start(), prefix).is_some()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}

/// Parse a chat message into a task command.
///
/// Returns `None` when the message is not a command (wrong prefix, or the
/// prefix runs into another word like `!todos`) and when it is a malformed
/// one (missing or non-numeric index, index 0, nothing after the prefix).
#[must_use]
pub fn parse_command(prefix: &str, raw: &str) -> Option<TaskCommand> {
    let rest = strip_prefix_ignore_case(raw.trim(), prefix)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim();
    let mut words = rest.split_whitespace();
    let first = words.next()?;

    match first.to_ascii_lowercase().as_str() {
        "done" => parse_index(words.next()).map(TaskCommand::Done),
        "delete" => parse_index(words.next()).map(TaskCommand::Delete),
        "clear" => Some(TaskCommand::Clear),
        _ => Some(TaskCommand::Add(rest.to_string())),
    }
}

/// How a single chat message would be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    /// The message as given.
    pub message: String,
    /// Whether the message starts with the command prefix.
    pub prefixed: bool,
    /// The command it triggers, if it is a well-formed one.
    pub command: Option<TaskCommand>,
}

/// Classify a chat message without applying it.
#[must_use]
pub fn interpret(prefix: &str, raw: &str) -> Interpretation {
    Interpretation {
        message: raw.to_string(),
        prefixed: has_prefix(raw, prefix),
        command: parse_command(prefix, raw),
    }
}

/// Convert a 1-based user index into a 0-based one.
fn parse_index(arg: Option<&str>) -> Option<usize> {
    arg?.parse::<usize>().ok()?.checked_sub(1)
}
