//! Raw CycloneDX JSON document shapes.
//!
//! These structures mirror the subset of the CycloneDX schema the merge
//! consumes. Fields the merge does not use (`serialNumber`, `version`) are
//! deserialized and passed through untouched. Every optional field degrades
//! to an empty/unknown default; only a document that cannot be deserialized
//! at all fails parsing.

use crate::model::{ComponentId, Severity, Vulnerability};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Well-known property key supplying a component's filesystem path.
pub const PATH_PROPERTY: &str = "syft:location:0:path";

/// One raw SBOM document, immutable once parsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Label assigned at parse time (file name or positional), used in
    /// error context and logs. Not part of the document itself.
    #[serde(skip)]
    pub label: String,
    pub bom_format: Option<String>,
    pub spec_version: Option<String>,
    pub serial_number: Option<String>,
    pub version: Option<u32>,
    pub metadata: Option<RawMetadata>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
    #[serde(default)]
    pub vulnerabilities: Vec<RawVulnerability>,
}

impl RawDocument {
    /// Project name declared by this document, if any.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .component
            .as_ref()?
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
    }

    /// Parsed analysis timestamp declared by this document, if any.
    ///
    /// An unparseable timestamp string degrades to `None`.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.as_ref()?.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Document metadata: timestamp and root metadata component.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub timestamp: Option<String>,
    pub component: Option<RawMetadataComponent>,
}

/// Root metadata component; only the name (project name) is consumed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadataComponent {
    pub name: Option<String>,
}

/// One raw component record, pre-merge.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    #[serde(alias = "bom-ref")]
    pub bom_ref: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub purl: Option<String>,
    pub licenses: Option<Vec<RawLicenseChoice>>,
    pub properties: Option<Vec<RawProperty>>,
}

impl RawComponent {
    /// Identity key: the raw reference string if present, else `name@version`.
    #[must_use]
    pub fn identity(&self) -> ComponentId {
        ComponentId::from_record(self.bom_ref.as_deref(), &self.name, self.version.as_deref())
    }

    /// First license id/name/expression found, if any.
    #[must_use]
    pub fn resolve_license(&self) -> Option<String> {
        for choice in self.licenses.as_deref().unwrap_or(&[]) {
            if let Some(license) = &choice.license {
                if let Some(id) = &license.id {
                    return Some(id.clone());
                }
                if let Some(name) = &license.name {
                    return Some(name.clone());
                }
            }
            if let Some(expression) = &choice.expression {
                return Some(expression.clone());
            }
        }
        None
    }

    /// Filesystem path recovered from the property list, if present.
    #[must_use]
    pub fn resolve_path(&self) -> Option<String> {
        self.properties
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|p| p.name == PATH_PROPERTY)
            .map(|p| p.value.clone())
    }
}

/// License choice: either a named license or an SPDX expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLicenseChoice {
    pub license: Option<RawLicense>,
    pub expression: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLicense {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Key-value property pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    pub name: String,
    pub value: String,
}

/// One raw dependency-edge record: `ref` depends on each entry of `dependsOn`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDependency {
    #[serde(rename = "ref")]
    pub ref_field: String,
    pub depends_on: Option<Vec<String>>,
}

/// One raw vulnerability record (forward compatibility: current inputs
/// carry none, but documents that do are surfaced onto their components).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVulnerability {
    pub id: String,
    pub description: Option<String>,
    pub recommendation: Option<String>,
    pub ratings: Option<Vec<RawRating>>,
    pub affects: Option<Vec<RawAffects>>,
}

impl RawVulnerability {
    /// Severity from the first rating carrying a label; `Info` otherwise.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.ratings
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find_map(|r| r.severity.as_deref())
            .map_or(Severity::Info, Severity::from_label)
    }

    /// References of the components this vulnerability affects.
    pub fn affected_refs(&self) -> impl Iterator<Item = &str> {
        self.affects
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|a| a.ref_field.as_str())
    }

    /// Convert to the merged-model vulnerability annotation.
    #[must_use]
    pub fn to_vulnerability(&self) -> Vulnerability {
        Vulnerability {
            id: self.id.clone(),
            severity: self.severity(),
            description: self.description.clone(),
            remediation: self.recommendation.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRating {
    pub severity: Option<String>,
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAffects {
    #[serde(rename = "ref")]
    pub ref_field: String,
}
