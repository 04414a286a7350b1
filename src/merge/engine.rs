//! The SBOM merge engine.
//!
//! Folds N parsed documents into one [`UnifiedModel`]: a deduplicated
//! component registry, the union of their dependency edges, and the
//! direct/transitive classification derived from inferred roots.
//!
//! All accumulation state is local to one `merge` call; concurrent merges of
//! different batches are fully independent.

use crate::model::{Component, ComponentId, ComponentType, UnifiedModel, UNKNOWN_LICENSE};
use crate::parsers::{RawComponent, RawDocument};
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Merge engine: a pure function of its input documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine {}

impl MergeEngine {
    /// Create a new merge engine
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Merge parsed documents into one unified model.
    ///
    /// Processing order determines the "first occurrence wins" tie-break for
    /// the project name and component scalar fields, and "latest wins" for
    /// the analysis timestamp. Repeated runs on identical input produce an
    /// identical model (same `content_hash`).
    #[must_use]
    pub fn merge(&self, documents: &[RawDocument]) -> UnifiedModel {
        let mut components: IndexMap<ComponentId, Component> = IndexMap::new();
        let mut edges: IndexMap<ComponentId, IndexSet<ComponentId>> = IndexMap::new();
        let mut project_name: Option<String> = None;
        let mut timestamp: Option<DateTime<Utc>> = None;

        for doc in documents {
            if project_name.is_none() {
                if let Some(name) = doc.project_name() {
                    project_name = Some(name.to_string());
                }
            }
            if let Some(ts) = doc.timestamp() {
                timestamp = Some(match timestamp {
                    Some(current) if current >= ts => current,
                    _ => ts,
                });
            }

            // Component collection: first occurrence wins, later duplicate
            // records are no-ops on scalar fields.
            for record in &doc.components {
                let id = record.identity();
                if !components.contains_key(&id) {
                    components.insert(id.clone(), component_from_record(id, record));
                }
            }

            // Edge collection: per-ref set union across all documents.
            for dep in &doc.dependencies {
                let Some(targets) = &dep.depends_on else {
                    continue;
                };
                if targets.is_empty() {
                    continue;
                }
                let entry = edges
                    .entry(ComponentId::from_ref(&dep.ref_field))
                    .or_default();
                for target in targets {
                    entry.insert(ComponentId::from_ref(target));
                }
            }
        }

        self.apply_vulnerabilities(documents, &mut components);
        self.apply_edges(&edges, &mut components);

        let mut roots = self.infer_roots(&mut components);
        self.propagate_direct(&roots, &mut components);

        // Degenerate fallback: no dependency edges anywhere, or every id is
        // some edge's target. Treat the whole map as direct roots so the
        // classification is never empty for a non-empty model.
        if roots.is_empty() && !components.is_empty() {
            tracing::debug!("no roots inferred; treating every component as a direct root");
            for (id, comp) in &mut components {
                comp.is_direct = true;
                roots.push(id.clone());
            }
        }

        let total_components = components.len();
        let direct_count = components.values().filter(|c| c.is_direct).count();
        let transitive_count = total_components - direct_count;

        let mut model = UnifiedModel {
            project_name: project_name.unwrap_or_else(|| "Unknown Project".to_string()),
            timestamp: timestamp.unwrap_or_else(Utc::now),
            components,
            roots,
            total_components,
            direct_count,
            transitive_count,
            content_hash: 0,
        };
        model.content_hash = model.compute_content_hash();

        tracing::info!(
            documents = documents.len(),
            total = model.total_components,
            direct = model.direct_count,
            transitive = model.transitive_count,
            roots = model.roots.len(),
            "merged documents into unified model"
        );

        model
    }

    /// Attach embedded vulnerability records to the components they affect.
    fn apply_vulnerabilities(
        &self,
        documents: &[RawDocument],
        components: &mut IndexMap<ComponentId, Component>,
    ) {
        for doc in documents {
            for vuln in &doc.vulnerabilities {
                for reference in vuln.affected_refs() {
                    let id = ComponentId::from_ref(reference);
                    if let Some(comp) = components.get_mut(&id) {
                        comp.vulnerabilities.push(vuln.to_vulnerability());
                    } else {
                        tracing::warn!(
                            document = %doc.label,
                            vulnerability = %vuln.id,
                            reference,
                            "vulnerability affects an id with no component record"
                        );
                    }
                }
            }
        }
    }

    /// Assign each accumulated edge set to its source component.
    ///
    /// Targets are kept even when they resolve to no component record
    /// (dangling edges); a source ref with no component record drops its
    /// edge set entirely.
    fn apply_edges(
        &self,
        edges: &IndexMap<ComponentId, IndexSet<ComponentId>>,
        components: &mut IndexMap<ComponentId, Component>,
    ) {
        for (source, targets) in edges {
            if targets.is_empty() {
                continue;
            }
            if let Some(comp) = components.get_mut(source) {
                comp.dependencies = targets.iter().cloned().collect();
            } else {
                tracing::warn!(
                    source = %source,
                    targets = targets.len(),
                    "dependency record references an id with no component record; edges dropped"
                );
            }
        }
    }

    /// Mark every component that is nobody's dependency target as a root.
    fn infer_roots(&self, components: &mut IndexMap<ComponentId, Component>) -> Vec<ComponentId> {
        let depended_upon: HashSet<ComponentId> = components
            .values()
            .flat_map(|c| c.dependencies.iter().cloned())
            .collect();

        let mut roots = Vec::new();
        for (id, comp) in components.iter_mut() {
            if !depended_upon.contains(id) {
                comp.is_direct = true;
                roots.push(id.clone());
            }
        }
        roots
    }

    /// Mark each root's immediate resolvable dependencies as direct.
    ///
    /// One hop only: dependencies of direct dependencies stay transitive.
    fn propagate_direct(
        &self,
        roots: &[ComponentId],
        components: &mut IndexMap<ComponentId, Component>,
    ) {
        for root in roots {
            let targets: Vec<ComponentId> = components
                .get(root)
                .map(|c| c.dependencies.clone())
                .unwrap_or_default();
            for target in targets {
                if let Some(comp) = components.get_mut(&target) {
                    comp.is_direct = true;
                }
            }
        }
    }
}

/// Seed a merged component from its first raw record.
fn component_from_record(id: ComponentId, record: &RawComponent) -> Component {
    let mut comp = Component::new(id, record.name.clone());
    if let Some(version) = &record.version {
        comp = comp.with_version(version.clone());
    }
    if let Some(purl) = &record.purl {
        comp = comp.with_purl(purl.clone());
    }
    comp.component_type = record
        .component_type
        .as_deref()
        .map_or(ComponentType::Library, ComponentType::from_label);
    comp.license = record
        .resolve_license()
        .unwrap_or_else(|| UNKNOWN_LICENSE.to_string());
    comp.path = record.resolve_path();
    comp
}
