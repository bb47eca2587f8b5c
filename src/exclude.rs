//! Vulnerability exclusion (deny-list) handling.
//!
//! An exclusion file holds one rule per line:
//!
//! ```text
//! # whole-line comments and blank lines are ignored
//! CVE-2021-12345
//! sonatype-2019-0001 # accepted risk, see ticket 482
//! CVE-2022-99999 until=2026-12-31
//! ```
//!
//! A rule with an `until` date is active only while the date is strictly
//! in the future at load time. A malformed date is a hard error: silently
//! dropping an exclusion the user asked for is worse than stopping.
//! Matching vulnerabilities are flagged `excluded`, which suppresses them
//! from rendered detail but never removes them from their package.

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::model::Coordinate;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#.*$").expect("valid regex"));
static UNTIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(until=)(.*)").expect("valid regex"));

#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
    #[error("failed to read exclusion file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse until date in line {line:?}, expected 'until=yyyy-MM-dd'")]
    InvalidUntil { line: String },
}

/// The set of vulnerability ids currently excluded. Expired `until`
/// rules are dropped at construction; there is no mid-run re-evaluation.
#[derive(Debug, Default, Clone)]
pub struct Exclusions {
    ids: Vec<String>,
}

impl Exclusions {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Loads exclusions from a deny-list file. A missing path (or a
    /// directory) yields an empty set; an unreadable file or a malformed
    /// `until` date is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExcludeError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_lines(content.lines(), Local::now().date_naive())
    }

    fn from_lines<'a>(
        lines: impl Iterator<Item = &'a str>,
        today: NaiveDate,
    ) -> Result<Self, ExcludeError> {
        let mut ids = Vec::new();
        for raw in lines {
            let line = COMMENT.replace(raw, "");
            let until = UNTIL.captures(&line).map(|caps| caps[2].to_string());
            let id = UNTIL.replace(&line, "").trim().to_string();
            if id.is_empty() {
                continue;
            }
            match until {
                Some(date) => {
                    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(
                        |_| ExcludeError::InvalidUntil {
                            line: raw.to_string(),
                        },
                    )?;
                    if parsed > today {
                        ids.push(id);
                    } else {
                        tracing::debug!(id, until = %parsed, "exclusion expired, ignoring");
                    }
                }
                None => ids.push(id),
            }
        }
        Ok(Self { ids })
    }

    /// Merges ids supplied on the command line into the set.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = String>) {
        self.ids.extend(ids.into_iter().filter(|id| !id.is_empty()));
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flags matching vulnerabilities on the audited packages. Records
    /// are marked, never removed, so vulnerable-package classification
    /// and counts are unaffected.
    pub fn mark(&self, packages: &mut [Coordinate]) {
        if self.ids.is_empty() {
            return;
        }
        for package in packages {
            for v in &mut package.vulnerabilities {
                if self.is_excluded(&v.id) || (!v.cve.is_empty() && self.is_excluded(&v.cve)) {
                    v.excluded = true;
                }
            }
        }
    }
}
