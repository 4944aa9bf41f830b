use super::CliModeResult;
use crate::{Cli, clipboard::read_clipboard, render::Renderer};
use anyhow::{Context, Result};
use sheetfill_core::{Config, ImportCache, import::parse_clipboard_text, render::PREVIEW_ENTRIES};
use std::{
    fs,
    io::{self, Read},
};
use tracing::info;

pub fn import_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<CliModeResult> {
    if !cli.import {
        return Ok(CliModeResult::NothingToDo);
    }

    let text = read_source(cli)?;
    let entries = parse_clipboard_text(&text)?;
    let cache = ImportCache::new(&config.data_dir);
    cache.store(&entries)?;
    info!(entries = entries.len(), path = %cache.path.display(), "import stored");

    renderer.print_success(&format!(
        "Data imported successfully! {} entries.",
        entries.len()
    ));
    renderer.print_preview(&entries, PREVIEW_ENTRIES);
    Ok(CliModeResult::Finish)
}

fn read_source(cli: &Cli) -> Result<String> {
    if cli.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    if let Some(path) = &cli.file {
        return fs::read_to_string(path).with_context(|| format!("reading {}", path.display()));
    }
    read_clipboard()
}
