use super::CliModeResult;
use crate::{Cli, launcher::SystemLauncher, render::Renderer};
use anyhow::{Result, anyhow};
use sheetfill_core::{Config, Coordinator};

pub fn open_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<CliModeResult> {
    let Some(target) = cli.open else {
        return Ok(CliModeResult::NothingToDo);
    };

    let coordinator = Coordinator::new(config.clone(), SystemLauncher::new(config.browser.clone()));
    let response = coordinator.open_page(target);
    if !response.success {
        return Err(anyhow!(
            response
                .error
                .unwrap_or_else(|| format!("Could not open the {} page", target.label()))
        ));
    }
    renderer.print_info(&format!(
        "Opened {} page: {}",
        target.label(),
        config.url(target)
    ));
    Ok(CliModeResult::Finish)
}
