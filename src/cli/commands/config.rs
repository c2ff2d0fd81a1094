use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::OverlayError;
use crate::output::to_json;

/// Execute configuration subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or written.
pub fn config(paths: &Paths, cmd: ConfigCommands, format: OutputFormat) -> Result<String, OverlayError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(&paths.config_file)?;
            match format {
                OutputFormat::Pretty => config.to_yaml(),
                OutputFormat::Json => to_json(&config),
            }
        }
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(OverlayError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!("Wrote default configuration to {}", paths.config_file.display()))
        }
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
    }
}
