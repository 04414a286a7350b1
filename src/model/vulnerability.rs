//! Vulnerability annotations carried on merged components.
//!
//! Only vulnerability data already embedded in an input document is
//! surfaced; no external feed is consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vulnerability severity ladder.
///
/// Variants are ordered from least to most severe so that `Ord`/`max` pick
/// the worst rating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse a severity label as it appears in CycloneDX ratings.
    ///
    /// Unrecognized labels degrade to `Info` rather than failing the merge.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Info,
        }
    }

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Info => "Info",
        }
    }

    /// Get severity weight (higher = worse)
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A vulnerability attached to a merged component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Vulnerability identifier (e.g., CVE-2021-44228)
    pub id: String,
    /// Severity rating
    pub severity: Severity,
    /// Human-readable description
    pub description: Option<String>,
    /// Suggested remediation
    pub remediation: Option<String>,
}

impl Vulnerability {
    /// Create a new vulnerability with the given id and severity
    #[must_use]
    pub const fn new(id: String, severity: Severity) -> Self {
        Self {
            id,
            severity,
            description: None,
            remediation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
    }

    #[test]
    fn test_severity_from_label() {
        assert_eq!(Severity::from_label("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::from_label("high"), Severity::High);
        assert_eq!(Severity::from_label("Medium"), Severity::Medium);
        assert_eq!(Severity::from_label("low"), Severity::Low);
        assert_eq!(Severity::from_label("informational"), Severity::Info);
        assert_eq!(Severity::from_label("bogus"), Severity::Info);
    }

    #[test]
    fn test_max_picks_worst() {
        let severities = [Severity::Low, Severity::Critical, Severity::Medium];
        assert_eq!(severities.iter().max(), Some(&Severity::Critical));
    }
}
