//! Filter predicates over a unified model.
//!
//! A [`FilterSpec`] is a conjunction of optional predicates: free-text
//! search over name/version, dependency kind, vulnerability severity, and
//! CVE-id substring. Applying a filter derives a view; it never mutates the
//! model.

use crate::model::{Component, Severity, UnifiedModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency-kind filter over the direct/transitive classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    #[default]
    All,
    Direct,
    Transitive,
}

impl DependencyKind {
    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Direct => "Direct",
            Self::Transitive => "Transitive",
        }
    }

    /// Whether the given component matches this kind.
    #[must_use]
    pub const fn matches(&self, component: &Component) -> bool {
        match self {
            Self::All => true,
            Self::Direct => component.is_direct,
            Self::Transitive => !component.is_direct,
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Filter criteria over merged components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring over name and version
    pub query: Option<String>,
    /// Direct/transitive selection
    pub kind: DependencyKind,
    /// Components must carry a vulnerability of exactly this severity
    pub severity: Option<Severity>,
    /// Case-insensitive substring over vulnerability ids
    pub cve: Option<String>,
}

impl FilterSpec {
    /// Create new empty criteria (everything passes)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no filters are active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.kind == DependencyKind::All
            && self.severity.is_none()
            && self.cve.is_none()
    }

    /// Set the free-text query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the dependency-kind selection
    #[must_use]
    pub const fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    /// Filter to components carrying a vulnerability of the given severity
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set the CVE-id substring
    #[must_use]
    pub fn with_cve(mut self, cve: impl Into<String>) -> Self {
        self.cve = Some(cve.into());
        self
    }

    /// Whether a single component passes every active predicate.
    #[must_use]
    pub fn matches(&self, component: &Component) -> bool {
        if !self.kind.matches(component) {
            return false;
        }

        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let name_hit = component.name.to_lowercase().contains(&query);
            let version_hit = component
                .version
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&query));
            if !name_hit && !version_hit {
                return false;
            }
        }

        if let Some(severity) = self.severity {
            if !component.has_severity(severity) {
                return false;
            }
        }

        if let Some(cve) = &self.cve {
            let cve = cve.to_lowercase();
            let hit = component
                .vulnerabilities
                .iter()
                .any(|v| v.id.to_lowercase().contains(&cve));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Derive the filtered component view, in model order.
    #[must_use]
    pub fn apply<'a>(&self, model: &'a UnifiedModel) -> Vec<&'a Component> {
        model
            .components
            .values()
            .filter(|c| self.matches(c))
            .collect()
    }
}
