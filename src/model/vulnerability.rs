use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NINE: LazyLock<Decimal> = LazyLock::new(|| Decimal::from(9));
static SEVEN: LazyLock<Decimal> = LazyLock::new(|| Decimal::from(7));
static FOUR: LazyLock<Decimal> = LazyLock::new(|| Decimal::from(4));

/// Severity band derived from a CVSS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Bands a CVSS score with fixed-point comparison; band lower bounds
    /// are inclusive, so exactly 9.0 is Critical.
    pub fn from_score(score: Decimal) -> Self {
        if score >= *NINE {
            Severity::Critical
        } else if score >= *SEVEN {
            Severity::High
        } else if score >= *FOUR {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vulnerability reported for an audited package.
///
/// `excluded` is set by the exclusion filter and only suppresses the
/// record from rendered detail; it is never serialized and never removes
/// the record from its package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cvss_score: Decimal,
    #[serde(default)]
    pub cvss_vector: String,
    #[serde(default)]
    pub cve: String,
    #[serde(default)]
    pub reference: String,
    #[serde(skip)]
    pub excluded: bool,
}

impl Vulnerability {
    pub fn severity(&self) -> Severity {
        Severity::from_score(self.cvss_score)
    }
}

/// An audited package: its purl coordinates and whatever vulnerabilities
/// the intelligence service reported for it. Constructed once from the
/// service response and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub coordinates: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

impl Coordinate {
    /// True when any vulnerability record is present. Exclusion does not
    /// reclassify a package; it only hides detail at render time.
    pub fn is_vulnerable(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}
