//! Child-to-parent lookup over a pedigree table.
//!
//! Identifiers are interned once into an arena so graph traversals work on
//! plain indices.

use std::collections::HashMap;

use super::normalize::Identifier;
use super::table::PedigreeTable;

/// Read-only view of the ancestry graph (edges point from child to parent).
///
/// Every identifier that appears anywhere in the table is a node, including
/// parents that were never registered; those have no parents of their own.
/// When an identifier is registered twice, the later record's parents win.
#[derive(Debug, Clone, Default)]
pub struct AncestryIndex {
    nodes: Vec<Identifier>,
    lookup: HashMap<Identifier, usize>,
    parents: Vec<Vec<usize>>,
}

impl AncestryIndex {
    pub fn build(table: &PedigreeTable) -> Self {
        let mut index = Self::default();

        for record in table {
            let child = index.intern(&record.id);
            let known: Vec<usize> = [&record.sire, &record.dam]
                .into_iter()
                .filter_map(|parent| parent.known())
                .map(|parent| index.intern(parent))
                .collect();
            index.parents[child] = known;
        }

        tracing::debug!(nodes = index.nodes.len(), "built ancestry index");
        index
    }

    fn intern(&mut self, id: &Identifier) -> usize {
        if let Some(&idx) = self.lookup.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.clone());
        self.parents.push(Vec::new());
        self.lookup.insert(id.clone(), idx);
        idx
    }

    /// Number of distinct identifiers in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn node(&self, idx: usize) -> &Identifier {
        &self.nodes[idx]
    }

    /// Parent indices of a node: sire first when known, then dam.
    pub fn parent_indices(&self, idx: usize) -> &[usize] {
        &self.parents[idx]
    }

    /// Known parents of `id`, sire first. Empty for unregistered identifiers.
    pub fn parents_of(&self, id: &str) -> Vec<&Identifier> {
        self.index_of(id)
            .map(|idx| self.parents[idx].iter().map(|&p| &self.nodes[p]).collect())
            .unwrap_or_default()
    }
}
