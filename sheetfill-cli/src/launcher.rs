use anyhow::{Context, Result};
use sheetfill_core::Launcher;
use std::process::{Command, Stdio};

/// Opens URLs with the configured browser, or the platform opener.
pub struct SystemLauncher {
    browser: Option<String>,
}

impl SystemLauncher {
    pub fn new(browser: Option<String>) -> Self {
        Self { browser }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(browser) = &self.browser {
            let mut cmd = Command::new(browser);
            cmd.arg(url);
            return cmd;
        }
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> Result<Option<u32>> {
        let mut cmd = self.command(url);
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("launching {:?}", cmd.get_program()))?;
        Ok(Some(child.id()))
    }
}
