use serde::{Deserialize, Serialize};

/// Package-manager family a listing was produced by.
///
/// Each family has a distinct listing text format and maps to a purl
/// ecosystem and distribution namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apk,
    Dpkg,
    Yum,
    Dnf,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Apk => "apk",
            PackageManager::Dpkg => "dpkg",
            PackageManager::Yum => "yum",
            PackageManager::Dnf => "dnf",
        }
    }

    /// Distribution family used as the purl namespace.
    pub fn distro(&self) -> &'static str {
        match self {
            PackageManager::Apk => "alpine",
            PackageManager::Dpkg => "debian",
            PackageManager::Yum | PackageManager::Dnf => "fedora",
        }
    }

    /// Purl type tag: `deb` for the dpkg family, `rpm` for the rest.
    pub fn ecosystem(&self) -> &'static str {
        match self {
            PackageManager::Dpkg => "deb",
            _ => "rpm",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apk" | "alpine" => Ok(PackageManager::Apk),
            "dpkg" | "apt" | "debian" => Ok(PackageManager::Dpkg),
            "yum" => Ok(PackageManager::Yum),
            "dnf" | "fedora" => Ok(PackageManager::Dnf),
            _ => Err(format!(
                "Unknown package manager: {}. Use: apk, dpkg, yum, dnf",
                s
            )),
        }
    }
}

/// A package name and best-effort canonical version extracted from one
/// line of package-manager output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_package_manager_from_str() {
        assert_eq!(
            PackageManager::from_str("apk").unwrap(),
            PackageManager::Apk
        );
        assert_eq!(
            PackageManager::from_str("alpine").unwrap(),
            PackageManager::Apk
        );
        assert_eq!(
            PackageManager::from_str("DPKG").unwrap(),
            PackageManager::Dpkg
        );
        assert_eq!(PackageManager::from_str("dnf").unwrap(), PackageManager::Dnf);
        assert!(PackageManager::from_str("pacman").is_err());
    }

    #[test]
    fn test_distro_and_ecosystem() {
        assert_eq!(PackageManager::Apk.distro(), "alpine");
        assert_eq!(PackageManager::Dpkg.distro(), "debian");
        assert_eq!(PackageManager::Yum.distro(), "fedora");
        assert_eq!(PackageManager::Dnf.distro(), "fedora");

        assert_eq!(PackageManager::Dpkg.ecosystem(), "deb");
        assert_eq!(PackageManager::Apk.ecosystem(), "rpm");
        assert_eq!(PackageManager::Yum.ecosystem(), "rpm");
    }
}
