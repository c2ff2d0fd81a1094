use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::OverlayError;
use crate::features::tasks::interpret;
use crate::output::format_interpretation;

/// Show how a chat message would be interpreted, using the configured prefix.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or output
/// formatting fails.
pub fn parse(paths: &Paths, message: &str, format: OutputFormat) -> Result<String, OverlayError> {
    let config = Config::load_from_path(&paths.config_file)?;
    let interpretation = interpret(&config.tasks.command_prefix, message);
    format_interpretation(&interpretation, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_uses_configured_prefix() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        std::fs::write(&paths.config_file, "tasks:\n  command_prefix: \"!task\"\n").unwrap();

        let out = parse(&paths, "!task water plants", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["command"]["command"], "add");
        assert_eq!(parsed["command"]["value"], "water plants");

        let out = parse(&paths, "!todo water plants", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["command"].is_null());
    }
}
