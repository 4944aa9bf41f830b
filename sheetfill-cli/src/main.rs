mod cli;
mod cli_modes;
mod clipboard;
mod launcher;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::{CliModeResult, fill_mode, import_mode, message_mode, open_mode, settings_mode};
use render::{RenderOptions, Renderer};
use sheetfill_core::Config;
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sheetfill: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--message` keeps stdout for the response.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::new();

    // First run: persist the default URLs so they show up in the config file.
    if let Some(path) = Config::default_path() {
        match Config::initialize(&path) {
            Ok(true) => debug!(path = %path.display(), "wrote default settings"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not write default settings"),
        }
    }
    let mut config = Config::load()?;

    let renderer = Renderer::new(RenderOptions {
        date_format: config.date_format.clone(),
        use_color: cli.color.enabled(),
    });

    if cli.path {
        renderer.print_info(&format!("{}", config.data_dir.display()));
        return Ok(());
    }

    if let CliModeResult::Finish = message_mode(&cli, &config)? {
        return Ok(());
    }

    if let CliModeResult::Finish = open_mode(&cli, &renderer, &config)? {
        return Ok(());
    }

    if let CliModeResult::Finish = settings_mode(&cli, &renderer, &mut config)? {
        return Ok(());
    }

    // Import and fill may run in the same call: import first, then fill with it.
    let imported = import_mode(&cli, &renderer, &config)?;
    let filled = fill_mode(&cli, &renderer, &config)?;

    if let (CliModeResult::NothingToDo, CliModeResult::NothingToDo) = (imported, filled) {
        renderer.print_info("Nothing to do. Try `sheetfill --import` or `sheetfill --help`.");
    }

    Ok(())
}
