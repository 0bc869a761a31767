//! x3d-bind entry point

mod args;
mod commands;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use x3d_core::{EditorRegistry, ExportOptions};

use crate::args::{Cli, Commands};
use crate::config::ConfigManager;
use crate::error::CliError;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "x3d_bind=info,x3d_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let manager = ConfigManager::new(cli.config);
    let options = export_options(&manager, cli.include_defaults);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog => commands::catalog(&manager.catalog()?, &mut out),
        Commands::Describe { element } => commands::describe(&manager.catalog()?, &element, &mut out),
        Commands::Normalize { file } => {
            commands::normalize(&manager.catalog()?, &file, &options, &mut out)
        }
        Commands::Set { element, edits } => commands::set(
            &manager.catalog()?,
            &EditorRegistry::new(),
            &element,
            &edits,
            &options,
            &mut out,
        ),
        Commands::Config { write } => commands::config(&manager, write, &mut out),
    }
}

/// Export options from the config, with the one-off command-line override
fn export_options(manager: &ConfigManager, include_defaults: bool) -> ExportOptions {
    let mut options = manager.config().export_options();
    options.include_defaults |= include_defaults;
    options
}
