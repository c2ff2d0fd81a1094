use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "study-overlay")]
#[command(about = "A terminal study-stream overlay: work/break timer, chat-driven tasks and Twitch chat")]
#[command(long_about = "study-overlay - A study-stream overlay for the terminal

Shows a work/break session timer, a task list and a live Twitch chat feed
side by side. Viewers manage the task list from chat with commands such as
\"!todo read chapter 2\" or \"!todo done 1\".

QUICK START:
  study-overlay                         Start the overlay in test mode
  study-overlay overlay -c mychannel    Start the overlay with live chat
  study-overlay tasks list              Show the saved task list
  study-overlay parse \"!todo done 1\"    See how a chat message is read

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  study-overlay <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Command to run (defaults to the overlay)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the overlay
    ///
    /// Opens the full-screen overlay with the session timer, task list and
    /// chat feed. Without a channel the overlay starts in test mode, where
    /// chat messages are typed by hand.
    ///
    /// # Keys
    ///
    ///   1 / 2 / 3    start / pause / reset the timer
    ///   j / k        move the task selection
    ///   space        toggle the selected task
    ///   d            delete the selected task
    ///   i            type a chat message (test mode)
    ///   t            switch between test and live mode
    ///   q            quit
    #[command(alias = "run")]
    Overlay(OverlayArgs),

    /// Manage the saved task list
    ///
    /// Operates on the same list the overlay restores at startup.
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// Show how a chat message is interpreted
    ///
    /// Prints the task command a message would trigger, or reports that it
    /// is plain chat.
    ///
    /// Example: study-overlay parse "!todo delete 2"
    Parse {
        /// The chat message
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// Example: study-overlay completions bash > ~/.bash_completion.d/study-overlay
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the overlay.
#[derive(Args, Debug, Default)]
pub struct OverlayArgs {
    /// Twitch channel to read chat from (overrides config)
    #[arg(long, short = 'c')]
    pub channel: Option<String>,

    /// Work phase length (e.g. 40, 40m, 1h30m)
    #[arg(long, short = 'w')]
    pub work: Option<String>,

    /// Break phase length (e.g. 15, 15m, 90s)
    #[arg(long = "break", short = 'b')]
    pub break_length: Option<String>,

    /// Start in test mode even when a channel is configured
    #[arg(long)]
    pub test: bool,

    /// Do not load or save the task list
    #[arg(long)]
    pub no_persist: bool,
}

/// Arguments for task commands.
#[derive(Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: Option<TasksCommands>,
}

/// Task subcommands.
#[derive(Subcommand, Debug)]
pub enum TasksCommands {
    /// List tasks
    #[command(alias = "ls")]
    List,

    /// Add a task
    ///
    /// Example: study-overlay tasks add read chapter 2
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Toggle a task between open and done
    Done {
        /// Task number as shown in the list (1-based)
        index: usize,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task number as shown in the list (1-based)
        index: usize,
    },

    /// Delete all tasks
    Clear,
}

/// Arguments for configuration commands.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}
