//! JSON report generator.

use super::{ModelReporter, ReportError, ReportFormat};
use crate::model::{Component, Severity, UnifiedModel, Vulnerability};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter (pretty-printed by default)
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelReporter for JsonReporter {
    fn generate(
        &self,
        model: &UnifiedModel,
        components: &[&Component],
    ) -> Result<String, ReportError> {
        let report = JsonModelReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "sbom-unify".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
            },
            model: ModelInfo {
                project_name: model.project_name.clone(),
                timestamp: model.timestamp.to_rfc3339(),
                total_components: model.total_components,
                direct_count: model.direct_count,
                transitive_count: model.transitive_count,
                root_components: model.roots.iter().map(|r| r.value().to_string()).collect(),
            },
            components: components.iter().map(|c| ComponentRow::from(*c)).collect(),
        };

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        serialized.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonModelReport {
    metadata: JsonReportMetadata,
    model: ModelInfo,
    components: Vec<ComponentRow>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct ModelInfo {
    project_name: String,
    timestamp: String,
    total_components: usize,
    direct_count: usize,
    transitive_count: usize,
    root_components: Vec<String>,
}

#[derive(Serialize)]
struct ComponentRow {
    id: String,
    name: String,
    version: Option<String>,
    #[serde(rename = "type")]
    component_type: String,
    purl: Option<String>,
    license: String,
    path: Option<String>,
    is_direct: bool,
    dependency_count: usize,
    dependencies: Vec<String>,
    max_severity: Option<Severity>,
    vulnerabilities: Vec<Vulnerability>,
}

impl From<&Component> for ComponentRow {
    fn from(comp: &Component) -> Self {
        Self {
            id: comp.id.value().to_string(),
            name: comp.name.clone(),
            version: comp.version.clone(),
            component_type: comp.component_type.to_string(),
            purl: comp.purl.clone(),
            license: comp.license.clone(),
            path: comp.path.clone(),
            is_direct: comp.is_direct,
            dependency_count: comp.dependency_count(),
            dependencies: comp
                .dependencies
                .iter()
                .map(|d| d.value().to_string())
                .collect(),
            max_severity: comp.max_severity(),
            vulnerabilities: comp.vulnerabilities.clone(),
        }
    }
}
