//! Reverse-lookup index over a unified model.
//!
//! Dependency edges live on each [`Component`] as a forward list; tree and
//! graph consumers also need the reverse direction (who depends on me).
//! Building the index once avoids repeated O(components × edges) scans.

use super::{ComponentId, UnifiedModel};
use std::collections::HashMap;

/// Precomputed reverse index over a [`UnifiedModel`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ModelIndex {
    /// Target id -> ids of components that depend on it
    dependents: HashMap<ComponentId, Vec<ComponentId>>,
    /// Total component count
    component_count: usize,
    /// Total edge count
    edge_count: usize,
}

impl ModelIndex {
    /// Build an index from a unified model.
    ///
    /// O(components + edges); the resulting lookups are O(1).
    pub fn build(model: &UnifiedModel) -> Self {
        let mut dependents: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();
        let mut edge_count = 0;

        for (id, comp) in &model.components {
            for target in &comp.dependencies {
                edge_count += 1;
                dependents.entry(target.clone()).or_default().push(id.clone());
            }
        }

        Self {
            dependents,
            component_count: model.components.len(),
            edge_count,
        }
    }

    /// Ids of components depending on the given id.
    ///
    /// Returns an empty slice for roots and for ids absent from the model
    /// (dangling targets are indexed too, so their dependents still resolve).
    pub fn dependents_of(&self, id: &ComponentId) -> &[ComponentId] {
        self.dependents
            .get(id)
            .map(std::vec::Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of components depending on the given id.
    pub fn dependent_count(&self, id: &ComponentId) -> usize {
        self.dependents.get(id).map(std::vec::Vec::len).unwrap_or(0)
    }

    /// Whether anything depends on the given id.
    pub fn has_dependents(&self, id: &ComponentId) -> bool {
        self.dependent_count(id) > 0
    }

    /// Ids ranked by dependent count, most depended-upon first.
    ///
    /// Ties break on id so repeated runs produce identical output.
    pub fn most_depended_upon(&self, limit: usize) -> Vec<(ComponentId, usize)> {
        let mut ranked: Vec<(ComponentId, usize)> = self
            .dependents
            .iter()
            .map(|(id, deps)| (id.clone(), deps.len()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Total component count.
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Total edge count.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
