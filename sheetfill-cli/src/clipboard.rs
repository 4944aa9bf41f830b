use anyhow::{Context, Result};
use arboard::Clipboard;

/// Text currently on the system clipboard. Non-text content reads as empty.
pub fn read_clipboard() -> Result<String> {
    let mut clipboard = Clipboard::new().context("opening the clipboard")?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(e).context("reading the clipboard"),
    }
}
