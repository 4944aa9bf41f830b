use super::CliModeResult;
use crate::{Cli, launcher::SystemLauncher};
use anyhow::{Context, Result};
use sheetfill_core::{Config, Coordinator, Launcher, PageSnapshot, Request, Response, SystemClock};
use std::io::{self, Read};
use std::path::Path;
use tracing::warn;

/// One request in, one response out. Request errors are answered, not raised.
pub fn message_mode(cli: &Cli, config: &Config) -> Result<CliModeResult> {
    if !cli.message {
        return Ok(CliModeResult::NothingToDo);
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading request from stdin")?;

    let coordinator = Coordinator::new(config.clone(), SystemLauncher::new(config.browser.clone()));
    let response = respond(&input, cli.page.as_deref(), &coordinator);

    println!("{}", serde_json::to_string(&response)?);
    Ok(CliModeResult::Finish)
}

fn respond<L: Launcher>(input: &str, page: Option<&Path>, coordinator: &Coordinator<L>) -> Response {
    let request = match serde_json::from_str::<Request>(input) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "malformed request");
            return Response::rejected(format!("Invalid request: {err}"));
        }
    };
    handle(request, page, coordinator).unwrap_or_else(|err| {
        warn!(error = %err, "request failed");
        Response::rejected(format!("{err:#}"))
    })
}

fn handle<L: Launcher>(
    request: Request,
    path: Option<&Path>,
    coordinator: &Coordinator<L>,
) -> Result<Response> {
    let clock = SystemClock::new();

    let Some(path) = path else {
        return Ok(coordinator.handle(request, None, &clock, &mut ()));
    };

    let mut page = PageSnapshot::load(path)?;
    let fills = matches!(request, Request::FillTimesheet { .. });
    let response = coordinator.handle(request, Some(&mut page), &clock, &mut ());
    if fills {
        page.save(path)?;
    }
    Ok(response)
}
