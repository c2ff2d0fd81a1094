//! Ordered task list.
//!
//! Tasks are addressed by position, so insertion order is part of the
//! contract. Out-of-range indices and blank text are silent no-ops.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::command::{parse_command, CommandSink, TaskCommand};
use crate::storage::KeyValueStore;

/// Key the task list is saved under.
pub const STORAGE_KEY: &str = "todos";

/// Marker the old string-only storage format appended to finished tasks.
const LEGACY_DONE_MARKER: &str = " X ";

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text, trimmed and non-empty.
    pub text: String,
    /// Whether the task is finished.
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Create an open task.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Stored shapes accepted when loading.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTask {
    Structured(Task),
    Legacy(String),
}

impl StoredTask {
    fn into_task(self) -> Option<Task> {
        match self {
            Self::Structured(task) => {
                let text = task.text.trim();
                (!text.is_empty()).then(|| Task {
                    text: text.to_string(),
                    done: task.done,
                })
            }
            Self::Legacy(raw) => {
                let mut text = raw.as_str();
                let mut done = false;
                while let Some(stripped) = text.strip_suffix(LEGACY_DONE_MARKER) {
                    text = stripped;
                    done = true;
                }
                let text = text.trim();
                (!text.is_empty()).then(|| Task {
                    text: text.to_string(),
                    done,
                })
            }
        }
    }
}

/// Ordered collection of tasks with optional persistence.
pub struct TaskList {
    tasks: Vec<Task>,
    prefix: String,
    store: Option<Box<dyn KeyValueStore>>,
}

impl TaskList {
    /// Create an empty, unpersisted list that understands `prefix` commands.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            prefix: prefix.into(),
            store: None,
        }
    }

    /// Create a list backed by `store`, restoring any saved tasks.
    ///
    /// Unreadable saved data is logged and ignored.
    #[must_use]
    pub fn with_store(prefix: impl Into<String>, store: Box<dyn KeyValueStore>) -> Self {
        let tasks = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => decode_tasks(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable saved task list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to load saved task list");
                Vec::new()
            }
        };
        debug!(count = tasks.len(), "task list restored");

        Self {
            tasks,
            prefix: prefix.into(),
            store: Some(store),
        }
    }

    /// All tasks in order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet done.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    /// Command prefix this list responds to.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Summary line for the task counter.
    #[must_use]
    pub fn counter_text(&self) -> String {
        if self.tasks.is_empty() {
            "0 tasks".to_string()
        } else {
            format!("{} of {} open", self.open_count(), self.tasks.len())
        }
    }

    /// Append a task. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.tasks.push(Task::new(text));
        self.save();
        true
    }

    /// Remove the task at a 0-based index.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return false;
        }
        self.tasks.remove(index);
        self.save();
        true
    }

    /// Flip the done flag of the task at a 0-based index.
    pub fn toggle_done(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        task.done = !task.done;
        self.save();
        true
    }

    /// Remove every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.save();
    }

    /// Apply a parsed command. Returns whether anything changed.
    pub fn apply(&mut self, command: &TaskCommand) -> bool {
        match command {
            TaskCommand::Add(text) => self.add(text),
            TaskCommand::Done(index) => self.toggle_done(*index),
            TaskCommand::Delete(index) => self.remove(*index),
            TaskCommand::Clear => {
                self.clear();
                true
            }
        }
    }

    fn save(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        let encoded = match serde_json::to_string(&self.tasks) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode task list");
                return;
            }
        };

        if let Err(e) = store.set(STORAGE_KEY, &encoded) {
            warn!(error = %e, "failed to save task list");
        }
    }
}

impl CommandSink for TaskList {
    fn command_prefix(&self) -> &str {
        &self.prefix
    }

    fn interpret_command(&mut self, raw: &str) -> bool {
        let Some(command) = parse_command(&self.prefix, raw) else {
            debug!(message = raw, "ignoring malformed task command");
            return false;
        };
        let changed = self.apply(&command);
        debug!(%command, changed, "task command applied");
        changed
    }
}

/// Decode a saved task list, accepting the legacy string-only format.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of tasks or strings.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    let stored: Vec<StoredTask> = serde_json::from_str(raw)?;
    Ok(stored.into_iter().filter_map(StoredTask::into_task).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;
    use crate::storage::{MemoryStore, MockKeyValueStore};

    fn texts(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut list = TaskList::new("!todo");
        list.add("first");
        list.add("  second  ");
        list.add("third");

        assert_eq!(texts(&list), vec!["first", "second", "third"]);
        assert!(list.tasks().iter().all(|t| !t.done));
    }

    #[test]
    fn test_add_ignores_blank_text() {
        let mut list = TaskList::new("!todo");
        assert!(!list.add(""));
        assert!(!list.add("   \t "));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut list = TaskList::new("!todo");
        list.add("a");
        list.add("b");

        assert!(list.toggle_done(1));
        assert!(list.tasks()[1].done);
        assert!(list.toggle_done(1));
        assert!(!list.tasks()[1].done);
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut list = TaskList::new("!todo");
        list.add("a");
        let before = list.tasks().to_vec();

        assert!(!list.remove(1));
        assert!(!list.toggle_done(5));
        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn test_remove() {
        let mut list = TaskList::new("!todo");
        list.add("a");
        list.add("b");
        list.add("c");

        assert!(list.remove(1));
        assert_eq!(texts(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_counter_text() {
        let mut list = TaskList::new("!todo");
        assert_eq!(list.counter_text(), "0 tasks");

        list.add("a");
        list.add("b");
        list.toggle_done(0);
        assert_eq!(list.counter_text(), "1 of 2 open");
    }

    #[test]
    fn test_command_add() {
        let mut list = TaskList::new("!todo");
        assert!(list.interpret_command("!todo buy milk"));

        assert_eq!(list.tasks(), &[Task::new("buy milk")]);
    }

    #[test]
    fn test_command_done_toggles_back_and_forth() {
        let mut list = TaskList::new("!todo");
        list.add("study");

        list.interpret_command("!todo done 1");
        assert!(list.tasks()[0].done);

        list.interpret_command("!todo done 1");
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_command_delete_and_clear() {
        let mut list = TaskList::new("!todo");
        list.add("a");
        list.add("b");
        list.add("c");

        list.interpret_command("!todo delete 2");
        assert_eq!(texts(&list), vec!["a", "c"]);

        list.interpret_command("!todo clear");
        assert!(list.is_empty());

        // Clearing an empty list is fine too
        list.interpret_command("!todo clear");
        assert!(list.is_empty());
    }

    #[test]
    fn test_malformed_commands_are_noops() {
        let mut list = TaskList::new("!todo");
        list.add("a");

        assert!(!list.interpret_command("!todo done"));
        assert!(!list.interpret_command("!todo delete x"));
        assert!(!list.interpret_command("!todo done 9"));
        assert!(!list.interpret_command("just chatting"));
        assert_eq!(texts(&list), vec!["a"]);
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn test_persists_after_each_mutation() {
        let mut list = TaskList::with_store("!todo", Box::new(MemoryStore::new()));
        list.add("a");
        list.toggle_done(0);

        let store = list.store.as_ref().unwrap();
        let saved = store.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode_tasks(&saved).unwrap(), vec![Task { text: "a".to_string(), done: true }]);
    }

    #[test]
    fn test_restores_from_store() {
        let mut store = MemoryStore::new();
        store
            .set(STORAGE_KEY, r#"[{"text":"read","done":true},{"text":"write"}]"#)
            .unwrap();

        let list = TaskList::with_store("!todo", Box::new(store));
        assert_eq!(list.len(), 2);
        assert!(list.tasks()[0].done);
        assert!(!list.tasks()[1].done);
    }

    #[test]
    fn test_decode_legacy_format() {
        let tasks = decode_tasks(r#"["Mathe lernen X ", "Code review", "   "]"#).unwrap();
        assert_eq!(
            tasks,
            vec![
                Task { text: "Mathe lernen".to_string(), done: true },
                Task::new("Code review"),
            ]
        );
    }

    #[test]
    fn test_decode_legacy_repeated_marker() {
        let tasks = decode_tasks(r#"["Read X  X "]"#).unwrap();
        assert_eq!(tasks, vec![Task { text: "Read".to_string(), done: true }]);
    }

    #[test]
    fn test_unreadable_saved_data_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();

        let list = TaskList::with_store("!todo", Box::new(store));
        assert!(list.is_empty());
    }

    #[test]
    fn test_store_failures_are_absorbed() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .times(2)
            .returning(|_, _| Err(OverlayError::Database("disk full".to_string())));

        let mut list = TaskList::with_store("!todo", Box::new(store));
        assert!(list.add("a"));
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_saves_full_sequence_under_todos_key() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .withf(|key, value| key == STORAGE_KEY && value == r#"[{"text":"a","done":false}]"#)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut list = TaskList::with_store("!todo", Box::new(store));
        list.add("a");
        // No-op operations do not write
        list.remove(3);
        list.add(" ");
    }
}
