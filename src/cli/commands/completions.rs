use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::OverlayError;

const BIN_NAME: &str = "study-overlay";

/// Generate a completion script, or installation instructions with `install`.
///
/// # Errors
///
/// Returns an error for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, OverlayError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        OverlayError::Config(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        return Ok(install_instructions(shell_type));
    }

    let mut buf = Vec::new();
    clap_complete::generate(shell_type, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| OverlayError::Parse(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "# Add to ~/.bashrc:\nsource <({BIN_NAME} completions bash)\n"
        ),
        Shell::Zsh => format!(
            "# Add to ~/.zshrc (before compinit):\nsource <({BIN_NAME} completions zsh)\n"
        ),
        Shell::Fish => format!(
            "# Save to the fish completions directory:\n{BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish\n"
        ),
        Shell::PowerShell => format!(
            "# Add to your PowerShell profile:\n{BIN_NAME} completions powershell | Out-String | Invoke-Expression\n"
        ),
        _ => format!("# Save the output of:\n{BIN_NAME} completions {shell}\n"),
    }
}
