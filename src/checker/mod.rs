//! Vulnerability intelligence lookups.
//!
//! The [`VulnerabilityChecker`] trait is the boundary between the local
//! parsing/reporting pipeline and the remote service: purls in, audited
//! [`Coordinate`]s out. The default implementation talks to Sonatype
//! OSS Index.

mod ossindex;

pub use ossindex::OssIndexChecker;

use crate::model::Coordinate;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VulnerabilityChecker: Send + Sync {
    fn name(&self) -> &'static str;

    /// Looks up vulnerability reports for the given purls. The returned
    /// list matches the request order, one entry per purl.
    async fn audit(&self, purls: &[String]) -> Result<Vec<Coordinate>>;
}

pub fn default_checker(
    username: Option<String>,
    token: Option<String>,
    cache_ttl_hours: u64,
) -> OssIndexChecker {
    OssIndexChecker::new(username, token, cache_ttl_hours)
}
