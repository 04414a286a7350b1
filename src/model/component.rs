//! Merged component identity and data.

use super::{Severity, Vulnerability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// License string used when no license information is present in the input.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Stable identity key for a component across documents.
///
/// The key is the raw `bom-ref` string when the source record carries one,
/// otherwise a synthesized `name@version` composite (bare `name` when the
/// record has no version). Every document contributing a record or edge for
/// the same key folds into one merged [`Component`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create an id from a raw reference string (`bom-ref` or a
    /// dependency-edge `ref`/`dependsOn` entry).
    #[must_use]
    pub fn from_ref(reference: &str) -> Self {
        Self(reference.to_string())
    }

    /// Synthesize an id from name and version when no reference exists.
    #[must_use]
    pub fn synthesize(name: &str, version: Option<&str>) -> Self {
        match version {
            Some(v) => Self(format!("{name}@{v}")),
            None => Self(name.to_string()),
        }
    }

    /// Compute the identity key for a raw component record: the reference
    /// string when present, else the `name@version` composite.
    #[must_use]
    pub fn from_record(bom_ref: Option<&str>, name: &str, version: Option<&str>) -> Self {
        match bom_ref {
            Some(r) => Self::from_ref(r),
            None => Self::synthesize(name, version),
        }
    }

    /// Get the id value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Component type classification (CycloneDX `type` field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
    Data,
    MachineLearningModel,
    Other(String),
}

impl ComponentType {
    /// Parse a CycloneDX component type label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "firmware" => Self::Firmware,
            "file" => Self::File,
            "data" => Self::Data,
            "machine-learning-model" => Self::MachineLearningModel,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application => write!(f, "application"),
            Self::Framework => write!(f, "framework"),
            Self::Library => write!(f, "library"),
            Self::Container => write!(f, "container"),
            Self::OperatingSystem => write!(f, "operating-system"),
            Self::Device => write!(f, "device"),
            Self::Firmware => write!(f, "firmware"),
            Self::File => write!(f, "file"),
            Self::Data => write!(f, "data"),
            Self::MachineLearningModel => write!(f, "machine-learning-model"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Component in the unified model — the canonical merged unit.
///
/// Scalar fields come from the first record seen for this id ("first
/// occurrence wins"); `dependencies` is the union across all documents;
/// `is_direct` is computed by the merge engine and never taken from input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Stable identity key, unique within the model
    pub id: ComponentId,
    /// Component name
    pub name: String,
    /// Version string
    pub version: Option<String>,
    /// Parsed semantic version (if valid)
    pub semver: Option<semver::Version>,
    /// Component type
    pub component_type: ComponentType,
    /// Package URL
    pub purl: Option<String>,
    /// First license id/name found, or "Unknown"
    pub license: String,
    /// Filesystem path recovered from the property list
    pub path: Option<String>,
    /// Whether this component is a root or one hop from a root
    pub is_direct: bool,
    /// Ids this component declares it depends on (union across documents,
    /// discovery order; targets may be dangling)
    pub dependencies: Vec<ComponentId>,
    /// Known vulnerabilities from the input documents
    pub vulnerabilities: Vec<Vulnerability>,
}

impl Component {
    /// Create a new component with minimal required fields
    #[must_use]
    pub fn new(id: ComponentId, name: String) -> Self {
        Self {
            id,
            name,
            version: None,
            semver: None,
            component_type: ComponentType::Library,
            purl: None,
            license: UNKNOWN_LICENSE.to_string(),
            path: None,
            is_direct: false,
            dependencies: Vec::new(),
            vulnerabilities: Vec::new(),
        }
    }

    /// Set the version and try to parse it as semver
    #[must_use]
    pub fn with_version(mut self, version: String) -> Self {
        self.semver = semver::Version::parse(&version).ok();
        self.version = Some(version);
        self
    }

    /// Set the package URL
    #[must_use]
    pub fn with_purl(mut self, purl: String) -> Self {
        self.purl = Some(purl);
        self
    }

    /// Number of declared dependencies (resolvable or dangling).
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Worst severity across this component's vulnerabilities, if any.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.vulnerabilities.iter().map(|v| v.severity).max()
    }

    /// Whether this component has a vulnerability with the given severity.
    #[must_use]
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.vulnerabilities.iter().any(|v| v.severity == severity)
    }

    /// Get display name with version
    #[must_use]
    pub fn display_name(&self) -> String {
        self.version
            .as_ref()
            .map_or_else(|| self.name.clone(), |v| format!("{}@{}", self.name, v))
    }
}
