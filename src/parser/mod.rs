//! Package-listing parsers.
//!
//! This module provides the [`PackageParser`] trait and one
//! implementation per package-manager family. All parsers share the same
//! contract: an ordered sequence of raw listing lines in, an ordered
//! sequence of [`Package`] values out, with output order mirroring input
//! order. Malformed lines are skipped or degraded, never fatal.
//!
//! | Parser | Listing command |
//! |--------|-----------------|
//! | [`ApkParser`] | `apk info -vv \| sort` |
//! | [`DpkgParser`] | `dpkg-query --show --showformat='${Package} ${Version}\n'` |
//! | [`YumParser`] | `yum list installed` / `dnf list installed` |
//!
//! # Example
//!
//! ```
//! use osaudit::model::PackageManager;
//! use osaudit::parser::parser_for;
//!
//! let parser = parser_for(PackageManager::Dpkg);
//! let lines = vec!["zlib1g 1:1.2.11.dfsg-0ubuntu2".to_string()];
//! let packages = parser.parse(&lines);
//! assert_eq!(packages[0].name, "zlib1g");
//! assert_eq!(packages[0].version, "1.2.11");
//! ```

mod apk;
mod dpkg;
pub(crate) mod version;
mod yum;

pub use apk::ApkParser;
pub use dpkg::DpkgParser;
pub use version::canonicalize_version;
pub use yum::YumParser;

use crate::model::{Package, PackageManager};

/// Trait for extracting name/version pairs from one package-manager
/// family's listing output.
pub trait PackageParser: Send + Sync {
    /// The package-manager family this parser handles.
    fn manager(&self) -> PackageManager;

    /// Parses raw listing lines into packages, preserving input order.
    /// Parsing is best-effort and never fails; unusable lines are
    /// skipped and unmatched versions degrade to an empty or raw string.
    fn parse(&self, lines: &[String]) -> Vec<Package>;
}

/// Returns the parser for a package-manager family. Yum and dnf share a
/// listing format and therefore a parser.
pub fn parser_for(manager: PackageManager) -> Box<dyn PackageParser> {
    match manager {
        PackageManager::Apk => Box::new(ApkParser),
        PackageManager::Dpkg => Box::new(DpkgParser),
        PackageManager::Yum | PackageManager::Dnf => Box::new(YumParser),
    }
}
