//! Last imported data, kept across sessions until the next import.

use crate::entry::TimeEntry;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_FILE_NAME: &str = "timesheet.json";

#[derive(Debug, Clone)]
pub struct ImportCache {
    pub path: PathBuf,
}

impl ImportCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CACHE_FILE_NAME),
        }
    }

    /// Overwrites the cache with `entries`.
    pub fn store(&self, entries: &[TimeEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating data dir {}", parent.display()))?;
        }
        let s = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, s).with_context(|| format!("writing {}", self.path.display()))
    }

    /// The cached entries, or `None` when nothing was imported yet.
    pub fn load(&self) -> Result<Option<Vec<TimeEntry>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let entries = serde_json::from_str(&s)
            .with_context(|| format!("parsing cached import {}", self.path.display()))?;
        Ok(Some(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_cache_loads_none() {
        let tmp = tempdir().unwrap();
        let cache = ImportCache::new(tmp.path());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn new_import_overwrites_previous_one() {
        let tmp = tempdir().unwrap();
        let cache = ImportCache::new(&tmp.path().join("nested"));
        cache
            .store(&[TimeEntry::new("2024-06-01", "8", "Old")])
            .unwrap();
        cache
            .store(&[TimeEntry::new("2024-06-02", "7.5", "New")])
            .unwrap();
        assert_eq!(
            cache.load().unwrap(),
            Some(vec![TimeEntry::new("2024-06-02", "7.5", "New")])
        );
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let tmp = tempdir().unwrap();
        let cache = ImportCache::new(tmp.path());
        fs::write(&cache.path, "not json").unwrap();
        assert!(cache.load().is_err());
    }
}
