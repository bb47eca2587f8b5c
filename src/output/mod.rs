//! Report rendering.
//!
//! One entry point, [`render`], turns audited packages into a rendered
//! report string plus the vulnerable-package count the caller uses for
//! its exit status. Rendering is pure: the same input produces the same
//! bytes every time, and the input is never mutated.

mod csv;
mod json;
mod text;

pub use csv::render_csv;
pub use json::render_json;
pub use text::render_text;

use crate::model::Coordinate;
use anyhow::Result;

/// Output encoding for the audit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable, ANSI-colorable report
    Text,
    /// JSON array of audited packages
    Json,
    /// Header-less CSV rows
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use 'text', 'json', or 'csv'", s)),
        }
    }
}

/// Renders the audited packages in the requested format.
///
/// `loud` includes non-vulnerable packages in the output; `no_color`
/// strips ANSI sequences from the text format. Returns the number of
/// vulnerable packages (any vulnerability record counts, excluded or
/// not) and the rendered report.
pub fn render(
    format: OutputFormat,
    loud: bool,
    no_color: bool,
    packages: &[Coordinate],
) -> Result<(usize, String)> {
    match format {
        OutputFormat::Json => render_json(loud, packages),
        OutputFormat::Csv => render_csv(loud, packages),
        OutputFormat::Text => render_text(no_color, loud, packages),
    }
}

/// Partitions packages into non-vulnerable and vulnerable sets,
/// preserving relative order within each. A package with only excluded
/// vulnerabilities still lands in the vulnerable set.
fn split_packages(packages: &[Coordinate]) -> (Vec<&Coordinate>, Vec<&Coordinate>) {
    packages.iter().partition(|p| !p.is_vulnerable())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Coordinate, Vulnerability};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    pub fn vulnerability(id: &str, cve: &str, score: &str) -> Vulnerability {
        Vulnerability {
            id: id.to_string(),
            title: format!("[{}] upstream advisory", cve),
            description: "An attacker can do unpleasant things to the affected package."
                .to_string(),
            cvss_score: Decimal::from_str(score).unwrap(),
            cvss_vector: "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H".to_string(),
            cve: cve.to_string(),
            reference: format!("https://ossindex.sonatype.org/vulnerability/{}", id),
            excluded: false,
        }
    }

    pub fn clean(purl: &str) -> Coordinate {
        Coordinate {
            coordinates: purl.to_string(),
            reference: format!("https://ossindex.sonatype.org/component/{}", purl),
            vulnerabilities: Vec::new(),
        }
    }

    pub fn vulnerable(purl: &str, vulns: Vec<Vulnerability>) -> Coordinate {
        Coordinate {
            coordinates: purl.to_string(),
            reference: format!("https://ossindex.sonatype.org/component/{}", purl),
            vulnerabilities: vulns,
        }
    }

    pub fn sample() -> Vec<Coordinate> {
        vec![
            clean("pkg:deb/debian/apt@1.6.12"),
            vulnerable(
                "pkg:deb/debian/zlib1g@1.2.11",
                vec![
                    vulnerability("aaaa-1111", "CVE-2018-25032", "7.5"),
                    vulnerability("bbbb-2222", "CVE-2022-37434", "9.8"),
                    vulnerability("cccc-3333", "CVE-2004-0797", "2.6"),
                ],
            ),
            clean("pkg:deb/debian/grep@3.1"),
        ]
    }
}
