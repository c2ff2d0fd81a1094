use tracing::info;

use super::open_task_list;
use crate::cli::args::{OutputFormat, TasksCommands};
use crate::config::{Config, Paths};
use crate::error::OverlayError;
use crate::output::format_tasks;

/// Execute task subcommands.
///
/// Every subcommand prints the resulting list. Unlike chat commands, bad
/// input here is reported as an error.
///
/// # Errors
///
/// Returns an error if storage cannot be opened, the index is out of range
/// or the task text is blank.
pub fn tasks(
    paths: &Paths,
    cmd: Option<TasksCommands>,
    format: OutputFormat,
) -> Result<String, OverlayError> {
    let config = Config::load_from_path(&paths.config_file)?;
    let mut list = open_task_list(paths, &config.tasks.command_prefix)?;

    match cmd.unwrap_or(TasksCommands::List) {
        TasksCommands::List => {}
        TasksCommands::Add { text } => {
            let text = text.join(" ");
            if !list.add(&text) {
                return Err(OverlayError::Parse("Task text cannot be empty".to_string()));
            }
            info!(task = %text.trim(), "task added from cli");
        }
        TasksCommands::Done { index } => {
            let position = to_position(index, list.len())?;
            list.toggle_done(position);
        }
        TasksCommands::Delete { index } => {
            let position = to_position(index, list.len())?;
            list.remove(position);
        }
        TasksCommands::Clear => {
            list.clear();
            info!("task list cleared from cli");
        }
    }

    format_tasks(list.tasks(), format)
}

/// Validate a 1-based task number against the list length.
fn to_position(index: usize, len: usize) -> Result<usize, OverlayError> {
    match index.checked_sub(1) {
        Some(position) if position < len => Ok(position),
        _ => Err(OverlayError::Parse(format!(
            "No task #{index} (the list has {len} task{})",
            if len == 1 { "" } else { "s" }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Paths) {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join(".study-overlay"));
        (dir, paths)
    }

    #[test]
    fn test_add_done_delete_persist() {
        let (_dir, paths) = setup();

        let add = |text: &str| TasksCommands::Add {
            text: text.split(' ').map(String::from).collect(),
        };
        tasks(&paths, Some(add("read chapter 2")), OutputFormat::Json).unwrap();
        tasks(&paths, Some(add("stretch")), OutputFormat::Json).unwrap();
        tasks(&paths, Some(TasksCommands::Done { index: 2 }), OutputFormat::Json).unwrap();

        let out = tasks(&paths, None, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["items"][0]["text"], "read chapter 2");
        assert_eq!(parsed["items"][1]["done"], true);

        let out = tasks(&paths, Some(TasksCommands::Delete { index: 1 }), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["text"], "stretch");
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let (_dir, paths) = setup();
        let err = tasks(&paths, Some(TasksCommands::Done { index: 1 }), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("No task #1"));

        let err = tasks(&paths, Some(TasksCommands::Delete { index: 0 }), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, OverlayError::Parse(_)));
    }

    #[test]
    fn test_blank_add_is_an_error() {
        let (_dir, paths) = setup();
        let err = tasks(
            &paths,
            Some(TasksCommands::Add { text: vec!["  ".to_string()] }),
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, OverlayError::Parse(_)));
    }

    #[test]
    fn test_clear() {
        let (_dir, paths) = setup();
        tasks(&paths, Some(TasksCommands::Add { text: vec!["a".to_string()] }), OutputFormat::Json).unwrap();
        let out = tasks(&paths, Some(TasksCommands::Clear), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["count"], 0);
    }

    #[test]
    fn test_to_position() {
        assert_eq!(to_position(1, 3).unwrap(), 0);
        assert_eq!(to_position(3, 3).unwrap(), 2);
        assert!(to_position(4, 3).is_err());
        assert!(to_position(0, 3).is_err());
    }
}
