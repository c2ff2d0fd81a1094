use clap::Parser;
use colored::Colorize;

use study_overlay::cli::args::{Cli, Commands, OverlayArgs};
use study_overlay::cli::commands;
use study_overlay::config::Paths;
use study_overlay::error::OverlayError;
use study_overlay::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), OverlayError> {
    let cli = Cli::parse();
    let format = cli.output;
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Overlay(OverlayArgs::default()));

    let paths = Paths::new()?;
    logging::init(&paths, matches!(command, Commands::Overlay(_)));

    let output = match command {
        Commands::Overlay(args) => commands::overlay(&paths, &args)?,
        Commands::Tasks(args) => commands::tasks(&paths, args.command, format)?,
        Commands::Parse { message } => commands::parse(&paths, &message.join(" "), format)?,
        Commands::Config(args) => commands::config(&paths, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
