use anyhow::{Context, Result};
use directories::BaseDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ConfigError;

pub const DEFAULT_ODOO_URL: &str = "https://odoo.innoq.io/innoq/users/";
pub const DEFAULT_RTIME_URL: &str = "https://r-time.rubeen.dev";
pub const DEFAULT_DATE_FORMAT: &str = "%a, %d %b %Y";

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://([^\s/?#:@]+)(:[0-9]{1,5})?([/?#]\S*)?$").expect("valid url regex")
});

/// The pages the tool knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PageTarget {
    Odoo,
    #[strum(serialize = "rtime")]
    RTime,
}

impl PageTarget {
    pub fn all() -> impl Iterator<Item = PageTarget> {
        PageTarget::iter()
    }

    /// Name shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            PageTarget::Odoo => "Odoo",
            PageTarget::RTime => "R-Time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Timesheet page on Odoo. This is the page that gets filled.
    pub odoo_url: String,
    /// R-Time app, where the time entries come from.
    pub rtime_url: String,
    /// Browser command used to open pages. Falls back to the platform opener.
    pub browser: Option<String>,
    /// Directory holding the import cache.
    pub data_dir: PathBuf,
    /// chrono format used for dates in the import preview.
    pub date_format: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    odoo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rtime_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for everything the file leaves out.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_default();
        Ok(Self::from_file_config(file_config))
    }

    /// Loads a specific config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    /// Writes the default URLs to `path` unless a config file already exists.
    /// Returns whether a file was written.
    pub fn initialize(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        let defaults = FileConfig {
            odoo_url: Some(DEFAULT_ODOO_URL.to_string()),
            rtime_url: Some(DEFAULT_RTIME_URL.to_string()),
            ..Default::default()
        };
        Self::write_file(path, &defaults)?;
        Ok(true)
    }

    /// Persists every setting to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file_config = FileConfig {
            odoo_url: Some(self.odoo_url.clone()),
            rtime_url: Some(self.rtime_url.clone()),
            browser: self.browser.clone(),
            data_dir: Some(self.data_dir.clone()),
            date_format: Some(self.date_format.clone()),
        };
        Self::write_file(path, &file_config)
    }

    pub fn url(&self, target: PageTarget) -> &str {
        match target {
            PageTarget::Odoo => &self.odoo_url,
            PageTarget::RTime => &self.rtime_url,
        }
    }

    /// Replaces one URL after checking its syntax. Invalid URLs leave the
    /// config untouched.
    pub fn set_url(&mut self, target: PageTarget, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if !is_valid_url(url) {
            return Err(ConfigError::InvalidUrl {
                target: target.to_string(),
                url: url.to_string(),
            });
        }
        match target {
            PageTarget::Odoo => self.odoo_url = url.to_string(),
            PageTarget::RTime => self.rtime_url = url.to_string(),
        }
        Ok(())
    }

    /// Restores both URLs to their defaults.
    pub fn reset(&mut self) {
        self.odoo_url = DEFAULT_ODOO_URL.to_string();
        self.rtime_url = DEFAULT_RTIME_URL.to_string();
    }

    /// Host part of the Odoo URL, used to recognize the timesheet page.
    pub fn odoo_host(&self) -> Option<&str> {
        url_host(&self.odoo_url)
    }

    /// Where settings are written: the first existing config file, or the XDG
    /// location when there is none yet.
    pub fn default_path() -> Option<PathBuf> {
        let candidates = Self::config_file_paths();
        candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| candidates.first())
            .cloned()
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self {
            odoo_url: file_config
                .odoo_url
                .unwrap_or_else(|| DEFAULT_ODOO_URL.to_string()),
            rtime_url: file_config
                .rtime_url
                .unwrap_or_else(|| DEFAULT_RTIME_URL.to_string()),
            browser: file_config.browser,
            data_dir: file_config.data_dir.unwrap_or_else(Self::default_data_dir),
            date_format: file_config
                .date_format
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        }
    }

    /// Default data root: `{data_dir}/sheetfill`
    /// - macOS:   `~/Library/Application Support/sheetfill`
    /// - Linux:   `$XDG_DATA_HOME/sheetfill` or `~/.local/share/sheetfill`
    /// - Windows: `%APPDATA%\sheetfill`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("sheetfill");
            p
        } else {
            PathBuf::from("./sheetfill")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("sheetfill")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("sheetfill").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    fn write_file(path: &Path, file_config: &FileConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {}", parent.display()))?;
        }
        let s = toml::to_string(file_config)?;
        fs::write(path, s).with_context(|| format!("writing {}", path.display()))
    }
}

/// Basic syntax check: http(s) scheme, a host, no whitespace.
pub fn is_valid_url(url: &str) -> bool {
    URL.is_match(url)
}

pub fn url_host(url: &str) -> Option<&str> {
    URL.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
