//! JSON output formatting for study-overlay.

use serde::Serialize;
use serde_json::json;

use crate::error::OverlayError;
use crate::features::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `OverlayError::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task]) -> Result<String, OverlayError> {
    let output = json!({
        "count": tasks.len(),
        "open": tasks.iter().filter(|t| !t.done).count(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `OverlayError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, OverlayError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tasks::{interpret, Interpretation};

    #[test]
    fn test_format_tasks_json() {
        let mut done = Task::new("stretch");
        done.done = true;
        let tasks = vec![Task::new("read chapter 2"), done];

        let result = format_tasks_json(&tasks).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["open"], 1);
        assert_eq!(parsed["items"][0]["text"], "read chapter 2");
        assert_eq!(parsed["items"][1]["done"], true);
    }

    #[test]
    fn test_format_empty_tasks_json() {
        let result = format_tasks_json(&[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["count"], 0);
        assert!(parsed["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_interpretation_json() {
        let result: Interpretation = interpret("!todo", "!todo delete 2");
        let parsed: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();

        assert_eq!(parsed["prefixed"], true);
        assert_eq!(parsed["command"]["command"], "delete");
        assert_eq!(parsed["command"]["value"], 1);
    }

    #[test]
    fn test_json_preserves_special_characters() {
        let tasks = vec![Task::new("Task with \"quotes\" and \\ backslashes")];
        let result = format_tasks_json(&tasks).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["items"][0]["text"], "Task with \"quotes\" and \\ backslashes");
    }
}
