use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result, bail};
use sheetfill_core::{
    Config, ImportCache, ImportError, PageSnapshot, PassState, Progress, ProgressSink,
    SystemClock, fill_page, settle,
};
use std::time::Duration;

/// Terminal rendition of the progress presentation.
struct TerminalProgress<'a> {
    renderer: &'a Renderer,
}

impl ProgressSink for TerminalProgress<'_> {
    fn update(&mut self, progress: &Progress) {
        self.renderer.print_progress(progress);
    }

    fn finish(&mut self, _summary: &str, _dismiss_after: Option<Duration>) {
        self.renderer.end_progress();
    }

    fn abort(&mut self, _error: &ImportError, _dismiss_after: Duration) {
        self.renderer.end_progress();
    }
}

pub fn fill_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<CliModeResult> {
    let Some(page_path) = &cli.fill else {
        return Ok(CliModeResult::NothingToDo);
    };

    let entries = ImportCache::new(&config.data_dir)
        .load()?
        .context("No imported data yet. Run `sheetfill --import` first.")?;

    let mut page = PageSnapshot::load(page_path)?;
    if !is_odoo_page(&page, config) {
        bail!(
            "{} is not the Odoo timesheet page. Open {} first.",
            page_path.display(),
            config.odoo_url
        );
    }

    let clock = SystemClock::new();
    let mut sink = TerminalProgress { renderer };
    let mut report = fill_page(&entries, &mut page, &clock, &mut sink)?;
    settle(&mut page, &mut report.deferred);

    let out = cli.out.as_ref().unwrap_or(page_path);
    page.save(out)?;

    match report.state {
        PassState::AllSucceeded => {
            renderer.print_success(&report.summary);
            renderer.print_info(&format!("Filled page written to {}", out.display()));
            Ok(CliModeResult::Finish)
        }
        PassState::PartialFailure => {
            renderer.print_error(&report.summary);
            bail!(
                "{} of {} rows could not be filled; page written to {}",
                report.outcome.failed,
                report.outcome.total,
                out.display()
            );
        }
    }
}

/// The snapshot was taken on the configured Odoo host.
fn is_odoo_page(page: &PageSnapshot, config: &Config) -> bool {
    match config.odoo_host() {
        Some(host) => page.url.contains(host),
        None => true,
    }
}
