//! Animals recorded both as a sire and as a dam.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::domain::{Identifier, PedigreeTable, Record};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualRoleEntry {
    pub id: Identifier,
    pub as_sire: usize,
    pub as_dam: usize,
    /// Records naming this animal in either role, each row once.
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DualRoleResult {
    /// Ordered by identifier.
    pub entries: Vec<DualRoleEntry>,
}

impl DualRoleResult {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn find_dual_roles(table: &PedigreeTable) -> DualRoleResult {
    let sires: HashSet<&Identifier> = table.iter().filter_map(|r| r.sire.known()).collect();
    let dams: HashSet<&Identifier> = table.iter().filter_map(|r| r.dam.known()).collect();

    let mut entries: BTreeMap<&Identifier, DualRoleEntry> = sires
        .intersection(&dams)
        .map(|&id| {
            (
                id,
                DualRoleEntry {
                    id: id.clone(),
                    as_sire: 0,
                    as_dam: 0,
                    records: Vec::new(),
                },
            )
        })
        .collect();

    if entries.is_empty() {
        return DualRoleResult::default();
    }

    for record in table {
        let sire = record.sire.known();
        let dam = record.dam.known();

        if let Some(entry) = sire.and_then(|id| entries.get_mut(id)) {
            entry.as_sire += 1;
            entry.records.push(record.clone());
        }
        if let Some(entry) = dam.and_then(|id| entries.get_mut(id)) {
            entry.as_dam += 1;
            // Same animal as both parents of one row: keep the row once.
            if sire != dam {
                entry.records.push(record.clone());
            }
        }
    }

    tracing::debug!(count = entries.len(), "dual-role animals");
    DualRoleResult {
        entries: entries.into_values().collect(),
    }
}
