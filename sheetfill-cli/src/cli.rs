use clap::{ArgGroup, Parser};
use sheetfill_core::PageTarget;
use std::{path::PathBuf, str::FromStr};

use crate::render::ColorMode;

/// sheetfill — Copy time entries from the clipboard into the Odoo timesheet
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("source").args(["stdin", "file"])),
    group(ArgGroup::new("settings_mode").args(["settings", "set_odoo_url", "set_rtime_url", "reset_settings"]).multiple(true)),
    group(ArgGroup::new("solo").args(["path", "message", "open"]).conflicts_with_all(["settings_mode", "import", "fill"])),
)]
pub struct Cli {
    /// Prints the data directory holding the last import
    #[arg(long, short)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Imports time entries (a JSON array of `{date, hours, text}`) from the clipboard
    /// and keeps them until the next import.
    #[arg(long, short)]
    pub import: bool,
    /// Read the import from stdin instead of the clipboard.
    #[arg(long, requires = "import")]
    pub stdin: bool,
    /// Read the import from a file instead of the clipboard.
    #[arg(long, requires = "import")]
    pub file: Option<PathBuf>,

    /// Fills the timesheet table of a page snapshot (JSON) with the last import.
    /// e.g. `sheetfill --fill page.json`
    #[arg(long, short)]
    pub fill: Option<PathBuf>,
    /// Where to write the filled page. Defaults to overwriting the `--fill` file.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Opens a configured page in the browser: `odoo` or `rtime`.
    #[arg(long, value_parser = parse_target)]
    pub open: Option<PageTarget>,

    /// Prints the current settings.
    #[arg(long)]
    pub settings: bool,
    /// Sets the Odoo timesheet URL.
    #[arg(long, value_name = "URL")]
    pub set_odoo_url: Option<String>,
    /// Sets the R-Time URL.
    #[arg(long, value_name = "URL")]
    pub set_rtime_url: Option<String>,
    /// Restores both URLs to their defaults.
    #[arg(long, conflicts_with_all = ["set_odoo_url", "set_rtime_url"])]
    pub reset_settings: bool,

    /// Answers one JSON request read from stdin with one JSON response on stdout.
    /// e.g. `echo '{"action":"openOdooPage"}' | sheetfill --message`
    #[arg(long)]
    pub message: bool,
    /// Page snapshot used by `fillTimesheet` requests.
    #[arg(long, requires = "message")]
    pub page: Option<PathBuf>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

fn parse_target(s: &str) -> Result<PageTarget, String> {
    PageTarget::from_str(s).map_err(|_| format!("unknown page '{s}', expected 'odoo' or 'rtime'"))
}
