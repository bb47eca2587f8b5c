//! Package-URL construction.
//!
//! Builds `pkg:<type>/<namespace>/<name>@<version>` identifiers from
//! parsed packages. This is plain string interpolation: empty or odd
//! fields pass through as-is, and a purl the vulnerability service
//! cannot resolve simply comes back without data.

use crate::model::{Package, PackageManager};

/// Builds the canonical purl for one package.
pub fn purl(manager: PackageManager, package: &Package) -> String {
    format!(
        "pkg:{}/{}/{}@{}",
        manager.ecosystem(),
        manager.distro(),
        package.name,
        package.version
    )
}

/// Builds purls for a whole listing, preserving order.
pub fn purls(manager: PackageManager, packages: &[Package]) -> Vec<String> {
    packages.iter().map(|p| purl(manager, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpkg_purl() {
        let p = Package::new("zlib1g", "1.2.11");
        assert_eq!(
            purl(PackageManager::Dpkg, &p),
            "pkg:deb/debian/zlib1g@1.2.11"
        );
    }

    #[test]
    fn test_apk_purl() {
        let p = Package::new("alpine-baselayout", "3.1.2-r0");
        assert_eq!(
            purl(PackageManager::Apk, &p),
            "pkg:rpm/alpine/alpine-baselayout@3.1.2-r0"
        );
    }

    #[test]
    fn test_yum_and_dnf_share_namespace() {
        let p = Package::new("bzip2-libs", "1.0.6");
        assert_eq!(
            purl(PackageManager::Yum, &p),
            "pkg:rpm/fedora/bzip2-libs@1.0.6"
        );
        assert_eq!(
            purl(PackageManager::Dnf, &p),
            "pkg:rpm/fedora/bzip2-libs@1.0.6"
        );
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let p = Package::new("", "");
        assert_eq!(purl(PackageManager::Apk, &p), "pkg:rpm/alpine/@");
    }

    #[test]
    fn test_purls_preserve_order() {
        let packages = vec![Package::new("a", "1.0"), Package::new("b", "2.0")];
        assert_eq!(
            purls(PackageManager::Dpkg, &packages),
            vec!["pkg:deb/debian/a@1.0", "pkg:deb/debian/b@2.0"]
        );
    }
}
