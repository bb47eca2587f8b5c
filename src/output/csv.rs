use crate::model::Coordinate;
use anyhow::Result;

/// CSV encoding, header-less. Vulnerable packages get one row per
/// vulnerability record, excluded or not (coordinates, reference, id,
/// title, description, vulnerability reference, score, cve, vector);
/// non-vulnerable packages get a two-column row and only appear when
/// loud.
pub fn render_csv(loud: bool, packages: &[Coordinate]) -> Result<(usize, String)> {
    let (_, vulnerable) = super::split_packages(packages);

    let mut out = String::new();
    if loud {
        for p in packages {
            write_package(&mut out, p);
        }
    } else {
        for p in &vulnerable {
            write_package(&mut out, p);
        }
    }
    Ok((vulnerable.len(), out))
}

fn write_package(out: &mut String, package: &Coordinate) {
    if package.is_vulnerable() {
        for v in &package.vulnerabilities {
            write_record(
                out,
                &[
                    &package.coordinates,
                    &package.reference,
                    &v.id,
                    &v.title,
                    &v.description,
                    &v.reference,
                    &v.cvss_score.to_string(),
                    &v.cve,
                    &v.cvss_vector,
                ],
            );
        }
    } else {
        write_record(out, &[&package.coordinates, &package.reference]);
    }
}

fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(field));
    }
    out.push('\n');
}

/// RFC 4180 quoting: only fields containing a comma, quote, or line
/// break get wrapped, with embedded quotes doubled.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
