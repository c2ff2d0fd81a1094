use tracing::info;

use super::open_task_list;
use crate::cli::args::OverlayArgs;
use crate::config::{Config, Paths};
use crate::error::OverlayError;
use crate::features::chat::ChatClientConfig;
use crate::features::tasks::TaskList;
use crate::features::timer::parse_duration;
use crate::storage::MemoryStore;
use crate::tui::{self, OverlaySettings};

/// Start the overlay and block until the user quits.
///
/// # Errors
///
/// Returns an error if a flag is invalid, storage cannot be opened or the
/// terminal cannot be set up.
pub fn overlay(paths: &Paths, args: &OverlayArgs) -> Result<String, OverlayError> {
    let config = Config::load_from_path(&paths.config_file)?;
    let settings = overlay_settings(&config, args)?;

    let tasks = if args.no_persist || !config.tasks.persist {
        TaskList::with_store(settings.command_prefix.clone(), Box::new(MemoryStore::new()))
    } else {
        open_task_list(paths, &settings.command_prefix)?
    };

    info!(
        work_seconds = settings.work_seconds,
        break_seconds = settings.break_seconds,
        live = settings.chat.is_some() && !settings.test_mode,
        "starting overlay"
    );
    tui::run(settings, tasks)?;
    Ok(String::new())
}

/// Merge configuration with command-line overrides.
///
/// # Errors
///
/// Returns `OverlayError::Parse` for an unreadable duration flag.
pub fn overlay_settings(config: &Config, args: &OverlayArgs) -> Result<OverlaySettings, OverlayError> {
    let work_seconds = match args.work.as_deref() {
        Some(value) => parse_duration(value)
            .ok_or_else(|| OverlayError::Parse(format!("Invalid work duration: {value}")))?,
        None => config.timer.work_minutes.saturating_mul(60),
    };
    let break_seconds = match args.break_length.as_deref() {
        Some(value) => parse_duration(value)
            .ok_or_else(|| OverlayError::Parse(format!("Invalid break duration: {value}")))?,
        None => config.timer.break_minutes.saturating_mul(60),
    };

    let mut chat = config.chat.clone();
    if let Some(channel) = &args.channel {
        chat.channel.clone_from(channel);
    }

    Ok(OverlaySettings {
        work_seconds,
        break_seconds,
        history: chat.history,
        command_prefix: config.tasks.command_prefix.clone(),
        test_username: chat.test_username.clone(),
        chat: chat.has_channel().then(|| ChatClientConfig::from(&chat)),
        test_mode: args.test,
    })
}
