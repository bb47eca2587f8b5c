//! Core data types for packages, vulnerabilities, and audit results.
//!
//! - [`PackageManager`] - The package-manager family a listing came from
//! - [`Package`] - A name/version pair extracted from one listing line
//! - [`Vulnerability`] - A reported vulnerability with its CVSS score
//! - [`Coordinate`] - An audited package keyed by its purl
//! - [`Severity`] - CVSS score band

mod package;
mod vulnerability;

pub use package::*;
pub use vulnerability::*;
