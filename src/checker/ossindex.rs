use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::cache::ReportCache;
use crate::model::Coordinate;

/// OSS Index accepts at most 128 coordinates per component-report call.
const BATCH_SIZE: usize = 128;

const COMPONENT_REPORT_URL: &str = "https://ossindex.sonatype.org/api/v3/component-report";

/// Client for the Sonatype OSS Index component-report API.
///
/// Reports are cached per purl, so only cache misses hit the network.
/// Anonymous use works but is rate-limited; a registered username and
/// API token raise the limits.
pub struct OssIndexChecker {
    client: reqwest::Client,
    cache: ReportCache,
    username: Option<String>,
    token: Option<String>,
}

#[derive(Serialize)]
struct ComponentReportRequest<'a> {
    coordinates: &'a [String],
}

impl OssIndexChecker {
    pub fn new(username: Option<String>, token: Option<String>, cache_ttl_hours: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: ReportCache::with_ttl_hours(cache_ttl_hours),
            username,
            token,
        }
    }

    async fn fetch_batch(&self, coordinates: &[String]) -> Result<Vec<Coordinate>> {
        let mut request = self
            .client
            .post(COMPONENT_REPORT_URL)
            .json(&ComponentReportRequest { coordinates });

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.token.as_deref());
        }

        let response = request
            .send()
            .await
            .context("failed to reach OSS Index")?
            .error_for_status()
            .context("OSS Index rejected the component-report request")?;

        response
            .json::<Vec<Coordinate>>()
            .await
            .context("failed to decode OSS Index response")
    }
}

#[async_trait]
impl super::VulnerabilityChecker for OssIndexChecker {
    fn name(&self) -> &'static str {
        "OSS Index"
    }

    async fn audit(&self, purls: &[String]) -> Result<Vec<Coordinate>> {
        let mut reports: HashMap<String, Coordinate> = HashMap::new();

        let misses: Vec<String> = purls
            .iter()
            .filter(|purl| match self.cache.get(purl) {
                Some(hit) => {
                    reports.insert((*purl).clone(), hit);
                    false
                }
                None => true,
            })
            .cloned()
            .collect();
        tracing::debug!(
            total = purls.len(),
            cached = purls.len() - misses.len(),
            "auditing purls"
        );

        for chunk in misses.chunks(BATCH_SIZE) {
            for report in self.fetch_batch(chunk).await? {
                if let Err(e) = self.cache.set(&report.coordinates, &report) {
                    tracing::debug!(error = %e, "failed to cache report");
                }
                reports.insert(report.coordinates.clone(), report);
            }
        }

        Ok(assemble(purls, &reports))
    }
}

/// Reassembles reports in request order. A purl appearing more than once
/// (multi-arch listings collapse to the same coordinates) gets the same
/// report each time; purls the service did not echo back degrade to an
/// empty report rather than vanish.
fn assemble(purls: &[String], reports: &HashMap<String, Coordinate>) -> Vec<Coordinate> {
    purls
        .iter()
        .map(|purl| {
            reports.get(purl).cloned().unwrap_or_else(|| Coordinate {
                coordinates: purl.clone(),
                reference: String::new(),
                vulnerabilities: Vec::new(),
            })
        })
        .collect()
}
