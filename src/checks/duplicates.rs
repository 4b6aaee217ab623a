//! Identifiers registered more than once.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{Identifier, PedigreeTable, Record};

/// Every record sharing one duplicated identifier, in original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    pub id: Identifier,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuplicatesResult {
    /// Ordered by identifier.
    pub groups: Vec<DuplicateGroup>,
}

impl DuplicatesResult {
    /// Number of distinct duplicated identifiers (not rows).
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    /// Total rows involved across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.id.as_str() == id)
    }
}

pub fn find_duplicates(table: &PedigreeTable) -> DuplicatesResult {
    let mut by_id: BTreeMap<&Identifier, Vec<&Record>> = BTreeMap::new();
    for record in table {
        by_id.entry(&record.id).or_default().push(record);
    }

    let groups: Vec<DuplicateGroup> = by_id
        .into_iter()
        .filter(|(_, records)| records.len() >= 2)
        .map(|(id, records)| DuplicateGroup {
            id: id.clone(),
            records: records.into_iter().cloned().collect(),
        })
        .collect();

    tracing::debug!(count = groups.len(), "duplicate identifiers");
    DuplicatesResult { groups }
}
