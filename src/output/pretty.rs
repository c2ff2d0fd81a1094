use colored::Colorize;

use crate::features::tasks::{Interpretation, Task};

/// Format a list of tasks as a numbered list
pub fn format_tasks_pretty(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{} (0 tasks)\n  No tasks", "Tasks".bold());
    }

    let open = tasks.iter().filter(|t| !t.done).count();
    let mut output = format!("{} ({open} of {} open)\n", "Tasks".bold(), tasks.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for (i, task) in tasks.iter().enumerate() {
        let (icon, text) = if task.done {
            ("[x]".green(), task.text.strikethrough().dimmed().to_string())
        } else {
            ("[ ]".white(), task.text.clone())
        };

        output.push_str(&format!("{:>3}. {icon} {text}\n", i + 1));
    }

    output
}

/// Describe how a chat message is read
pub fn format_interpretation_pretty(interpretation: &Interpretation) -> String {
    let mut output = format!("{}: {}\n", "Message".dimmed(), interpretation.message);

    match (&interpretation.command, interpretation.prefixed) {
        (Some(command), _) => {
            output.push_str(&format!("{}: {}", "Command".dimmed(), command.to_string().green()));
        }
        (None, true) => {
            output.push_str(&format!(
                "{}: {}",
                "Command".dimmed(),
                "malformed, ignored".yellow()
            ));
        }
        (None, false) => {
            output.push_str(&format!("{}: {}", "Command".dimmed(), "none (plain chat)".normal()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tasks::interpret;

    #[test]
    fn test_format_empty_tasks() {
        colored::control::set_override(false);
        let result = format_tasks_pretty(&[]);
        assert!(result.contains("Tasks (0 tasks)"));
        assert!(result.contains("No tasks"));
    }

    #[test]
    fn test_format_tasks_numbers_from_one() {
        colored::control::set_override(false);
        let mut done = Task::new("stretch");
        done.done = true;
        let result = format_tasks_pretty(&[Task::new("read"), done]);

        assert!(result.contains("1 of 2 open"));
        assert!(result.contains("  1. [ ] read"));
        assert!(result.contains("  2. [x] stretch"));
    }

    #[test]
    fn test_format_interpretation_variants() {
        colored::control::set_override(false);

        let result = format_interpretation_pretty(&interpret("!todo", "!todo buy milk"));
        assert!(result.contains("add \"buy milk\""));

        let result = format_interpretation_pretty(&interpret("!todo", "!todo done zero"));
        assert!(result.contains("malformed"));

        let result = format_interpretation_pretty(&interpret("!todo", "hi chat"));
        assert!(result.contains("plain chat"));
    }
}
