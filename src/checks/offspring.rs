//! Offspring counts per sire and per dam.
//!
//! This is an aggregation for manual review, not a defect list: the result
//! never decides what number of offspring is implausible.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{Identifier, ParentRole, PedigreeTable, Record};

/// Number of parents kept per role unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentTally {
    pub id: Identifier,
    pub count: usize,
    /// Offspring records in original order.
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OffspringCountResult {
    pub top_sires: Vec<ParentTally>,
    pub top_dams: Vec<ParentTally>,
}

impl OffspringCountResult {
    pub fn for_role(&self, role: ParentRole) -> &[ParentTally] {
        match role {
            ParentRole::Sire => &self.top_sires,
            ParentRole::Dam => &self.top_dams,
        }
    }
}

pub fn count_offspring(table: &PedigreeTable, top_n: usize) -> OffspringCountResult {
    OffspringCountResult {
        top_sires: tally(table, ParentRole::Sire, top_n),
        top_dams: tally(table, ParentRole::Dam, top_n),
    }
}

/// Descending by count, ties ascending by identifier, at most `top_n`.
fn tally(table: &PedigreeTable, role: ParentRole, top_n: usize) -> Vec<ParentTally> {
    let mut by_parent: HashMap<&Identifier, Vec<&Record>> = HashMap::new();
    for record in table {
        if let Some(parent) = record.parent(role).known() {
            by_parent.entry(parent).or_default().push(record);
        }
    }

    let mut tallies: Vec<(&Identifier, Vec<&Record>)> = by_parent.into_iter().collect();
    tallies.sort_by(|(a_id, a), (b_id, b)| b.len().cmp(&a.len()).then_with(|| a_id.cmp(b_id)));
    tallies.truncate(top_n);

    tracing::debug!(%role, kept = tallies.len(), "offspring tallies");
    tallies
        .into_iter()
        .map(|(id, records)| ParentTally {
            id: id.clone(),
            count: records.len(),
            records: records.into_iter().cloned().collect(),
        })
        .collect()
}
