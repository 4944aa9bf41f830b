use super::theme::Palette;
use sheetfill_core::{
    Progress, TimeEntry,
    render::{PREVIEW_TEXT_CHARS, format_entry_date, format_preview, truncate_text},
};
use std::io::{self, Write};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: Palette::info_skin(),
            opts,
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_success(&self, message: &str) {
        self.print_status(message, Palette::SUCCESS);
    }

    pub fn print_error(&self, message: &str) {
        self.print_status(message, Palette::ERROR);
    }

    fn print_status(&self, message: &str, color: Color) {
        if self.opts.use_color {
            println!("{}", message.with(color).bold());
        } else {
            println!("{message}");
        }
    }

    /// Preview of an import: up to three entries, then `...`.
    pub fn print_preview(&self, entries: &[TimeEntry], max: usize) {
        if !self.opts.use_color {
            for line in format_preview(entries, max) {
                println!("{line}");
            }
            return;
        }
        for entry in entries.iter().take(max) {
            let date = format_entry_date(entry, &self.opts.date_format).with(Color::Cyan);
            let hours = entry.hours.as_str().with(Color::Blue);
            let text = truncate_text(&entry.text, PREVIEW_TEXT_CHARS).with(Color::Yellow);
            println!("{date}: {hours} - {text}");
        }
        if entries.len() > max {
            println!("...");
        }
    }

    /// Redraws a single progress line. Only drawn on a terminal.
    pub fn print_progress(&self, progress: &Progress) {
        if !self.opts.use_color {
            return;
        }
        let filled = PROGRESS_BAR_WIDTH * progress.percentage as usize / 100;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(PROGRESS_BAR_WIDTH - filled)
        );
        print!(
            "\r{} {:>3}% {}",
            bar.with(Palette::PROGRESS),
            progress.percentage,
            progress.status.as_str().with(Palette::MUTED)
        );
        let _ = io::stdout().flush();
    }

    /// Ends the progress line started by [`print_progress`](Self::print_progress).
    pub fn end_progress(&self) {
        if self.opts.use_color {
            println!();
        }
    }

    pub fn print_setting(&self, name: &str, value: &str) {
        if self.opts.use_color {
            println!("{} {}", format!("{name}:").with(Palette::LABEL), value);
        } else {
            println!("{name}: {value}");
        }
    }
}
