use crate::model::{Package, PackageManager};
use crate::parser::version::canonicalize_version;

/// Parser for `yum list installed` / `dnf list installed` output, lines
/// like `bzip2-libs.x86_64  1.0.6-13.el7  @CentOS`. The architecture
/// suffix is dropped from the name.
pub struct YumParser;

impl super::PackageParser for YumParser {
    fn manager(&self) -> PackageManager {
        PackageManager::Yum
    }

    fn parse(&self, lines: &[String]) -> Vec<Package> {
        let mut packages = Vec::new();
        for line in lines {
            if line.contains("Loaded plugins") {
                tracing::debug!("skipping loaded plugins header");
                continue;
            }
            if line.trim() == "Installed Packages" {
                tracing::debug!("skipping install list header");
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                tracing::debug!(line, "skipping malformed yum line");
                continue;
            }
            let name = fields[0].split('.').next().unwrap_or_default();
            packages.push(Package::new(name, canonicalize_version(fields[1])));
        }
        packages
    }
}
