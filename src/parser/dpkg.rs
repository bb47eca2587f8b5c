use crate::model::{Package, PackageManager};
use crate::parser::version::canonicalize_version;

/// Parser for `dpkg-query --show --showformat='${Package} ${Version}\n'`
/// and `apt list --installed` output. The first field is the package name
/// (`name/suite` from apt is truncated at the slash), the second the raw
/// version.
pub struct DpkgParser;

impl super::PackageParser for DpkgParser {
    fn manager(&self) -> PackageManager {
        PackageManager::Dpkg
    }

    fn parse(&self, lines: &[String]) -> Vec<Package> {
        let mut packages = Vec::new();
        for line in lines {
            let trimmed = line.trim();
            if trimmed == "Listing... Done" {
                tracing::debug!("skipping apt listing header");
                continue;
            }
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() < 2 {
                tracing::debug!(line, "skipping malformed dpkg line");
                continue;
            }
            let name = fields[0].split('/').next().unwrap_or_default();
            packages.push(Package::new(name, canonicalize_version(fields[1])));
        }
        packages
    }
}
