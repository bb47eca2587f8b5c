//! Package-manager auto-detection.
//!
//! Reads the distribution id and version from the systemd os-release
//! file and maps them to a [`PackageManager`]. Old fedora (<= 22) and
//! centos/rhel (<= 7) still ship yum; everything newer in that family
//! uses dnf.

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::model::PackageManager;

const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Detects the package manager of the running system.
pub fn detect() -> Result<PackageManager> {
    for path in OS_RELEASE_PATHS {
        if Path::new(path).is_file() {
            let content = std::fs::read_to_string(path)?;
            let id = parse_field(&content, "ID")
                .ok_or_else(|| anyhow!("os-release has no ID field"))?;
            let version = parse_field(&content, "VERSION_ID").unwrap_or_default();
            let manager = detect_from(&id, &version)?;
            tracing::info!(%id, %manager, "detected package manager");
            return Ok(manager);
        }
    }
    Err(anyhow!("unable to read os-release"))
}

/// Maps an os-release ID/VERSION_ID pair to a package manager.
pub fn detect_from(id: &str, version: &str) -> Result<PackageManager> {
    let major = version
        .split('.')
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);

    match id {
        "alpine" => Ok(PackageManager::Apk),
        "debian" | "ubuntu" | "mint" => Ok(PackageManager::Dpkg),
        "fedora" if major <= 22 => Ok(PackageManager::Yum),
        "fedora" => Ok(PackageManager::Dnf),
        "centos" | "rhel" | "redhat" if major <= 7 => Ok(PackageManager::Yum),
        "centos" | "rhel" | "redhat" => Ok(PackageManager::Dnf),
        _ => Err(anyhow!(
            "No supported package manager found; apk, dpkg, dnf or yum installed?"
        )),
    }
}

/// Extracts `FIELD=value` from os-release contents, stripping quotes and
/// lowercasing the value.
fn parse_field(content: &str, field: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.strip_prefix(field)?.strip_prefix('=')?;
        Some(rest.trim_matches(['"', ' ']).to_lowercase())
    })
}
