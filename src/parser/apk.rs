use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Package, PackageManager};

/// Longest prefix that ends right before a `-` followed by a
/// non-alphabetic character; keeps digits inside names like `libssl1.1`.
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)-[^a-zA-Z]").expect("valid regex"));

/// Hyphen-delimited numeric version run with its `-rN` release suffix,
/// anchored at the end of the name-version token. Unlike the dpkg/yum
/// canonicalizer, the release suffix is kept verbatim. Versions with a
/// letter component (`1.1.1c`) do not match and degrade to empty.
static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d[\d.]*(?:-r\d+)?)$").expect("valid regex"));

/// Parser for `apk info -vv` output, lines like
/// `alpine-baselayout-3.1.2-r0 - Alpine base dir structure and init scripts`.
pub struct ApkParser;

impl super::PackageParser for ApkParser {
    fn manager(&self) -> PackageManager {
        PackageManager::Apk
    }

    fn parse(&self, lines: &[String]) -> Vec<Package> {
        lines
            .iter()
            .filter(|line| !line.contains("WARNING"))
            .map(|line| parse_line(line))
            .collect()
    }
}

fn parse_line(line: &str) -> Package {
    let token = line.trim().split(' ').next().unwrap_or_default();

    let name = NAME
        .captures(token)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    let version = VERSION
        .captures(token)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    if name.is_empty() || version.is_empty() {
        tracing::debug!(line, "apk line did not fully parse");
    }

    Package::new(name, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PackageParser;

    // generate CLI package list via:
    // # apk info -vv | sort
    const APK_INFO: &str = "\
WARNING: Ignoring APKINDEX.00740ba1.tar.gz: No such file or directory
WARNING: Ignoring APKINDEX.d8b2a6f4.tar.gz: No such file or directory
alpine-baselayout-3.1.2-r0 - Alpine base dir structure and init scripts
alpine-keys-2.1-r2 - Public keys for Alpine Linux packages
apk-tools-2.10.4-r2 - Alpine Package Keeper - package manager for alpine
busybox-1.30.1-r2 - Size optimized toolbox of many common UNIX utilities
ca-certificates-cacert-20190108-r0 - Mozilla bundled certificates
libc-utils-0.7.1-r0 - Meta package to pull in correct libc
libcrypto1.1-1.1.1c-r0 - Crypto library from openssl
libssl1.1-1.1.1c-r0 - SSL shared libraries
libtls-standalone-2.9.1-r0 - libtls extricated from libressl sources
musl-1.1.22-r3 - the musl c library (libc) implementation
musl-utils-1.1.22-r3 - the musl c library (libc) implementation
scanelf-1.2.3-r0 - Scan ELF binaries for stuff
ssl_client-1.30.1-r2 - EXternal ssl_client for busybox wget
zlib-1.2.11-r1 - A compression/decompression Library";

    fn lines() -> Vec<String> {
        APK_INFO.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_apk_info_list() {
        let packages = ApkParser.parse(&lines());

        // Both WARNING lines skipped.
        assert_eq!(packages.len(), 14);

        assert_eq!(packages[0], Package::new("alpine-baselayout", "3.1.2-r0"));
        assert_eq!(packages[1], Package::new("alpine-keys", "2.1-r2"));
        assert_eq!(packages[2], Package::new("apk-tools", "2.10.4-r2"));
        assert_eq!(
            packages[4],
            Package::new("ca-certificates-cacert", "20190108-r0")
        );
        assert_eq!(packages[12], Package::new("ssl_client", "1.30.1-r2"));
    }

    #[test]
    fn test_name_keeps_embedded_digits() {
        let packages = ApkParser.parse(&[
            "libcrypto1.1-1.1.1c-r0 - Crypto library from openssl".to_string()
        ]);
        assert_eq!(packages[0].name, "libcrypto1.1");
    }

    #[test]
    fn test_letter_version_degrades_to_empty() {
        // 1.1.1c has no numeric suffix match; the name still parses.
        let packages =
            ApkParser.parse(&["libssl1.1-1.1.1c-r0 - SSL shared libraries".to_string()]);
        assert_eq!(packages[0].name, "libssl1.1");
        assert_eq!(packages[0].version, "");
    }

    #[test]
    fn test_unparseable_line_yields_empty_fields() {
        let packages = ApkParser.parse(&["not_a_package_line".to_string()]);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0], Package::new("", ""));
    }

    #[test]
    fn test_warning_lines_emit_nothing() {
        let packages = ApkParser.parse(&[
            "WARNING: Ignoring APKINDEX.00740ba1.tar.gz: No such file or directory".to_string(),
        ]);
        assert!(packages.is_empty());
    }
}
