//! Parents that are referenced but never registered as their own record.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::domain::{Identifier, PedigreeTable};

/// A referenced parent without a record, with how often it is referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingParent {
    pub id: Identifier,
    pub as_sire: usize,
    pub as_dam: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingParentsResult {
    /// Sorted ascending by identifier.
    pub missing: Vec<MissingParent>,
}

impl MissingParentsResult {
    pub fn count(&self) -> usize {
        self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.missing.iter().map(|m| &m.id)
    }
}

pub fn find_missing_parents(table: &PedigreeTable) -> MissingParentsResult {
    let registered: HashSet<&Identifier> = table.iter().map(|r| &r.id).collect();

    let mut referenced: BTreeMap<&Identifier, (usize, usize)> = BTreeMap::new();
    for record in table {
        if let Some(sire) = record.sire.known() {
            referenced.entry(sire).or_default().0 += 1;
        }
        if let Some(dam) = record.dam.known() {
            referenced.entry(dam).or_default().1 += 1;
        }
    }

    let missing: Vec<MissingParent> = referenced
        .into_iter()
        .filter(|(id, _)| !registered.contains(id))
        .map(|(id, (as_sire, as_dam))| MissingParent {
            id: id.clone(),
            as_sire,
            as_dam,
        })
        .collect();

    tracing::debug!(count = missing.len(), "missing parents");
    MissingParentsResult { missing }
}
