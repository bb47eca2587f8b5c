//! File-based caching of vulnerability reports.
//!
//! Audited coordinates are cached one JSON file per purl so repeated
//! audits of an unchanged system skip the network entirely. Entries
//! expire after a TTL (12 hours by default, matching the service's own
//! guidance) and are evicted lazily on read.
//!
//! The cache lives in the platform cache directory, e.g.
//! `~/.cache/osaudit/` on Linux.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::model::Coordinate;

/// Default report TTL in hours.
const CACHE_TTL_HOURS: u64 = 12;

/// A TTL cache of per-purl vulnerability reports.
pub struct ReportCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ReportCache {
    /// Creates a cache with the default 12-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl_hours(CACHE_TTL_HOURS)
    }

    pub fn with_ttl_hours(hours: u64) -> Self {
        Self {
            dir: cache_dir(),
            ttl: Duration::from_secs(hours * 3600),
        }
    }

    #[cfg(test)]
    fn with_dir(dir: PathBuf, hours: u64) -> Self {
        Self {
            dir,
            ttl: Duration::from_secs(hours * 3600),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Converts a purl to a safe cache filename.
    fn cache_path(&self, purl: &str) -> PathBuf {
        let safe_key: String = purl
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe_key))
    }

    /// Returns the cached report for a purl, or `None` when absent or
    /// expired. Expired entries are removed on the way out.
    pub fn get(&self, purl: &str) -> Option<Coordinate> {
        let path = self.cache_path(purl);
        if !path.exists() {
            return None;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                if let Ok(elapsed) = SystemTime::now().duration_since(modified) {
                    if elapsed > self.ttl {
                        let _ = fs::remove_file(&path);
                        tracing::trace!(purl, "cache entry expired");
                        return None;
                    }
                }
            }
        }

        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Stores one audited report.
    pub fn set(&self, purl: &str, report: &Coordinate) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string(report)?;
        fs::write(self.cache_path(purl), content)?;
        Ok(())
    }

    /// Removes every cached report.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            for entry in fs::read_dir(&self.dir)?.flatten() {
                let path = entry.path();
                if path.extension().map(|e| e == "json").unwrap_or(false) {
                    let _ = fs::remove_file(path);
                }
            }
        }
        Ok(())
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("osaudit")
}
