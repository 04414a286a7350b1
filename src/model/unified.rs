//! The unified dependency model produced by a merge.

use super::{Component, ComponentId, Severity, Vulnerability};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Unified dependency model — the merged result of one upload batch.
///
/// Constructed once by [`MergeEngine::merge`](crate::merge::MergeEngine::merge)
/// and immutable thereafter; filtering and selection derive views over it
/// without mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedModel {
    /// Project name from the first document that declares one
    pub project_name: String,
    /// Latest document timestamp, or merge time when no document carries one
    pub timestamp: DateTime<Utc>,
    /// Components indexed by id, in discovery order
    pub components: IndexMap<ComponentId, Component>,
    /// Ids of inferred root components
    pub roots: Vec<ComponentId>,
    /// Total component count
    pub total_components: usize,
    /// Count of direct components (roots and one-hop dependencies)
    pub direct_count: usize,
    /// Count of transitive components (everything not direct)
    pub transitive_count: usize,
    /// Content hash for quick equality checks
    pub content_hash: u64,
}

impl UnifiedModel {
    /// Get a component by id.
    ///
    /// Dangling dependency targets simply return `None` here.
    #[must_use]
    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Total component count
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether the given id is an inferred root
    #[must_use]
    pub fn is_root(&self, id: &ComponentId) -> bool {
        self.roots.contains(id)
    }

    /// Iterate over direct components
    pub fn direct_components(&self) -> impl Iterator<Item = &Component> {
        self.components.values().filter(|c| c.is_direct)
    }

    /// Get all vulnerabilities across all components
    #[must_use]
    pub fn all_vulnerabilities(&self) -> Vec<(&Component, &Vulnerability)> {
        self.components
            .values()
            .flat_map(|c| c.vulnerabilities.iter().map(move |v| (c, v)))
            .collect()
    }

    /// Count vulnerabilities by severity
    #[must_use]
    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for (_, vuln) in self.all_vulnerabilities() {
            match vuln.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    /// Build a reverse-lookup index for this model.
    ///
    /// Build once and reuse for repeated dependents queries.
    #[must_use]
    pub fn build_index(&self) -> super::ModelIndex {
        super::ModelIndex::build(self)
    }

    /// Compute the content hash over ids, scalar fields, and edges.
    ///
    /// The timestamp is excluded: it defaults to merge time when absent from
    /// the input, and the hash must be identical for identical input.
    #[must_use]
    pub fn compute_content_hash(&self) -> u64 {
        let mut hasher_input = Vec::new();

        hasher_input.extend(self.project_name.as_bytes());

        for (id, comp) in &self.components {
            hasher_input.extend(id.value().as_bytes());
            hasher_input.extend(comp.name.as_bytes());
            if let Some(v) = &comp.version {
                hasher_input.extend(v.as_bytes());
            }
            if let Some(purl) = &comp.purl {
                hasher_input.extend(purl.as_bytes());
            }
            hasher_input.extend(comp.license.as_bytes());
            if let Some(path) = &comp.path {
                hasher_input.extend(path.as_bytes());
            }
            hasher_input.push(u8::from(comp.is_direct));
            for dep in &comp.dependencies {
                hasher_input.extend(dep.value().as_bytes());
            }
            for vuln in &comp.vulnerabilities {
                hasher_input.extend(vuln.id.as_bytes());
            }
        }

        for root in &self.roots {
            hasher_input.extend(root.value().as_bytes());
        }

        xxh3_64(&hasher_input)
    }
}

/// Vulnerability counts by severity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeverityCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vulnerability;

    fn make_model() -> UnifiedModel {
        let mut components = IndexMap::new();

        let root_id = ComponentId::from_ref("app");
        let mut root = Component::new(root_id.clone(), "app".to_string());
        root.is_direct = true;
        root.dependencies = vec![ComponentId::from_ref("lib")];

        let lib_id = ComponentId::from_ref("lib");
        let mut lib = Component::new(lib_id.clone(), "lib".to_string());
        lib.is_direct = true;
        lib.vulnerabilities
            .push(Vulnerability::new("CVE-2024-0001".into(), Severity::High));

        components.insert(root_id.clone(), root);
        components.insert(lib_id, lib);

        let mut model = UnifiedModel {
            project_name: "demo".to_string(),
            timestamp: Utc::now(),
            components,
            roots: vec![root_id],
            total_components: 2,
            direct_count: 2,
            transitive_count: 0,
            content_hash: 0,
        };
        model.content_hash = model.compute_content_hash();
        model
    }

    #[test]
    fn test_lookup_and_roots() {
        let model = make_model();
        assert!(model.get(&ComponentId::from_ref("app")).is_some());
        assert!(model.get(&ComponentId::from_ref("missing")).is_none());
        assert!(model.is_root(&ComponentId::from_ref("app")));
        assert!(!model.is_root(&ComponentId::from_ref("lib")));
    }

    #[test]
    fn test_severity_counts() {
        let model = make_model();
        let counts = model.severity_counts();
        assert_eq!(counts.high, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_content_hash_ignores_timestamp() {
        let mut a = make_model();
        let mut b = make_model();
        b.timestamp = a.timestamp + chrono::Duration::hours(1);
        a.content_hash = a.compute_content_hash();
        b.content_hash = b.compute_content_hash();
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_content_hash_tracks_edges() {
        let mut a = make_model();
        let original = a.compute_content_hash();
        if let Some(comp) = a.components.get_mut(&ComponentId::from_ref("lib")) {
            comp.dependencies.push(ComponentId::from_ref("extra"));
        }
        assert_ne!(a.compute_content_hash(), original);
    }
}
