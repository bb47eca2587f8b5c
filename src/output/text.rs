use crate::model::{Coordinate, Severity, Vulnerability};
use anyhow::Result;
use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::{Panel, Style};

/// Soft-wrap width for vulnerability descriptions.
const WRAP_WIDTH: usize = 75;

const BOLD_RED: &str = "1;31";
const RED: &str = "31";
const YELLOW: &str = "33";
const GREEN: &str = "32";
const BOLD_GREEN: &str = "1;32";

/// Text encoding: an optional loud list of non-vulnerable packages, the
/// vulnerable packages with one titled block per non-excluded
/// vulnerability (sorted descending by CVSS score), and a trailing
/// summary table.
pub fn render_text(no_color: bool, loud: bool, packages: &[Coordinate]) -> Result<(usize, String)> {
    let (clean, vulnerable) = super::split_packages(packages);
    let mut out = String::new();

    if loud {
        out.push_str("\nNon Vulnerable Packages\n\n");
        for (k, p) in clean.iter().enumerate() {
            out.push_str(&format!(
                "[{}/{}]\t{}\n",
                k + 1,
                clean.len(),
                paint(&p.coordinates, BOLD_GREEN, no_color),
            ));
        }
    }

    if !vulnerable.is_empty() {
        out.push_str("\nVulnerable Packages\n\n");
        for (k, p) in vulnerable.iter().enumerate() {
            format_vulnerable(&mut out, no_color, k + 1, vulnerable.len(), p);
        }
    }

    let mut summary = Builder::default();
    summary.push_record(["Audited Packages", &packages.len().to_string()]);
    summary.push_record([
        "Vulnerable Packages",
        &paint(&vulnerable.len().to_string(), BOLD_RED, no_color),
    ]);
    let mut summary = summary.build();
    summary.with(Panel::header("Summary")).with(Style::modern());
    out.push_str(&summary.to_string());
    out.push('\n');

    Ok((vulnerable.len(), out))
}

fn format_vulnerable(
    out: &mut String,
    no_color: bool,
    idx: usize,
    package_count: usize,
    package: &Coordinate,
) {
    out.push_str(&format!(
        "[{}/{}]\t{}\n{}\n",
        idx,
        package_count,
        paint(&package.coordinates, BOLD_RED, no_color),
        paint(
            &format!(
                "{} known vulnerabilities affecting installed version",
                package.vulnerabilities.len()
            ),
            RED,
            no_color,
        ),
    ));

    // Stable sort keeps equal scores in service order.
    let mut vulnerabilities = package.vulnerabilities.clone();
    vulnerabilities.sort_by(|a, b| b.cvss_score.cmp(&a.cvss_score));

    for v in vulnerabilities.iter().filter(|v| !v.excluded) {
        out.push_str(&format_block(no_color, v));
        out.push('\n');
    }
}

fn format_block(no_color: bool, v: &Vulnerability) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Description", &wrap(&v.description, WRAP_WIDTH)]);
    builder.push_record(["ID", &v.id]);
    builder.push_record([
        "CVSS Score",
        &format!(
            "{}/10 ({})",
            v.cvss_score,
            Severity::from_score(v.cvss_score)
        ),
    ]);
    builder.push_record(["CVSS Vector", &v.cvss_vector]);
    builder.push_record(["Link for more info", &v.reference]);

    let mut table = builder.build();
    table
        .with(Panel::header(score_color(v.cvss_score, &v.title, no_color)))
        .with(Style::modern());
    table.to_string()
}

fn score_color(score: Decimal, text: &str, no_color: bool) -> String {
    match Severity::from_score(score) {
        Severity::Critical => paint(text, BOLD_RED, no_color),
        Severity::High => paint(text, RED, no_color),
        Severity::Medium => paint(text, YELLOW, no_color),
        Severity::Low => paint(text, GREEN, no_color),
    }
}

fn paint(s: &str, codes: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[{}m{}\x1b[0m", codes, s)
    }
}

/// Greedy soft wrap on whitespace; words longer than the width are kept
/// whole rather than broken.
fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line = word.to_string();
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_sections_and_summary() {
        let packages = fixtures::sample();
        let (count, out) = render_text(true, false, &packages).unwrap();
        assert_eq!(count, 1);

        assert!(!out.contains("Non Vulnerable Packages"));
        assert!(out.contains("Vulnerable Packages"));
        assert!(out.contains("3 known vulnerabilities affecting installed version"));
        assert!(out.contains("Summary"));
        assert!(out.contains("Audited Packages"));
    }

    #[test]
    fn test_loud_lists_clean_packages() {
        let packages = fixtures::sample();
        let (_, out) = render_text(true, true, &packages).unwrap();
        assert!(out.contains("Non Vulnerable Packages"));
        assert!(out.contains("[1/2]\tpkg:deb/debian/apt@1.6.12"));
        assert!(out.contains("[2/2]\tpkg:deb/debian/grep@3.1"));
    }

    #[test]
    fn test_blocks_sorted_by_descending_score() {
        let packages = fixtures::sample();
        let (_, out) = render_text(true, false, &packages).unwrap();

        let critical = out.find("9.8/10 (Critical)").unwrap();
        let high = out.find("7.5/10 (High)").unwrap();
        let low = out.find("2.6/10 (Low)").unwrap();
        assert!(critical < high);
        assert!(high < low);
    }

    #[test]
    fn test_excluded_hidden_but_still_counted() {
        let mut packages = fixtures::sample();
        // Exclude the critical finding; the headline count and the
        // vulnerable classification must not change.
        packages[1]
            .vulnerabilities
            .iter_mut()
            .find(|v| v.id == "bbbb-2222")
            .unwrap()
            .excluded = true;

        let (count, out) = render_text(true, false, &packages).unwrap();
        assert_eq!(count, 1);
        assert!(!out.contains("bbbb-2222"));
        assert!(out.contains("aaaa-1111"));
        assert!(out.contains("3 known vulnerabilities affecting installed version"));
    }

    #[test]
    fn test_no_color_strips_ansi() {
        let packages = fixtures::sample();
        let (_, plain) = render_text(true, false, &packages).unwrap();
        assert!(!plain.contains('\x1b'));

        let (_, colored) = render_text(false, false, &packages).unwrap();
        assert!(colored.contains("\x1b[1;31m"));
    }

    #[test]
    fn test_wrap_width() {
        let text = "word ".repeat(40);
        let wrapped = wrap(&text, WRAP_WIDTH);
        assert!(wrapped.lines().all(|l| l.len() <= WRAP_WIDTH));
        assert!(wrapped.lines().count() > 1);

        // Long tokens survive unbroken.
        let token = "x".repeat(120);
        assert_eq!(wrap(&token, WRAP_WIDTH), token);
    }
}
