//! Task list driven by direct interaction and chat commands.

mod command;
mod list;

pub use command::{has_prefix, interpret, parse_command, CommandSink, Interpretation, TaskCommand};
pub use list::{decode_tasks, Task, TaskList, STORAGE_KEY};
