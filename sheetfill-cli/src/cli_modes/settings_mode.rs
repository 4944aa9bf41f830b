use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use sheetfill_core::{Config, PageTarget};
use std::path::Path;

pub fn settings_mode(cli: &Cli, renderer: &Renderer, config: &mut Config) -> Result<CliModeResult> {
    let edits = cli.reset_settings || cli.set_odoo_url.is_some() || cli.set_rtime_url.is_some();
    if !edits && !cli.settings {
        return Ok(CliModeResult::NothingToDo);
    }

    let path = Config::default_path().context("could not determine the config directory")?;

    if edits {
        // Validate everything before persisting anything.
        let mut updated = config.clone();
        if cli.reset_settings {
            updated.reset();
        }
        if let Some(url) = &cli.set_odoo_url {
            updated.set_url(PageTarget::Odoo, url)?;
        }
        if let Some(url) = &cli.set_rtime_url {
            updated.set_url(PageTarget::RTime, url)?;
        }
        updated.save(&path)?;
        *config = updated;
        if cli.reset_settings {
            renderer.print_success("Settings reset!");
        } else {
            renderer.print_success("Settings saved!");
        }
    }

    print_settings(renderer, config, &path);
    Ok(CliModeResult::Finish)
}

fn print_settings(renderer: &Renderer, config: &Config, path: &Path) {
    for target in PageTarget::all() {
        renderer.print_setting(&format!("{} URL", target.label()), config.url(target));
    }
    renderer.print_setting("Browser", config.browser.as_deref().unwrap_or("system default"));
    renderer.print_setting("Data directory", &config.data_dir.display().to_string());
    renderer.print_setting("Config file", &path.display().to_string());
}
