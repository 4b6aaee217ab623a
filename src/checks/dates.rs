//! Birth-date ordering between each individual and its parents.
//!
//! A child must be born strictly after each parent. Parents without a usable
//! birth date, and parents that are not registered, are skipped.

use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Identifier, ParentRole, PedigreeTable};

/// How to resolve a parent whose identifier is registered more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateParentPolicy {
    /// Use the birth date of the last record with that identifier, and mark
    /// the resolution as ambiguous.
    #[default]
    LastWins,
    /// Do not compare against a duplicated parent; report it as unresolved.
    Skip,
}

impl fmt::Display for DuplicateParentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateParentPolicy::LastWins => write!(f, "last-wins"),
            DuplicateParentPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for DuplicateParentPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-wins" | "last_wins" | "last" => Ok(DuplicateParentPolicy::LastWins),
            "skip" => Ok(DuplicateParentPolicy::Skip),
            other => bail!(
                "Invalid duplicate parent policy '{}'. Use 'last-wins' or 'skip'.",
                other
            ),
        }
    }
}

/// A parent looked up in the birth-date index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParent {
    pub id: Identifier,
    pub birth_date: NaiveDate,
    /// The identifier is registered more than once; the date came from the
    /// last of those records.
    pub ambiguous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateInconsistency {
    pub child_id: Identifier,
    pub row: usize,
    pub child_birth_date: NaiveDate,
    /// Sire before dam when both fail.
    pub failing_roles: Vec<ParentRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sire: Option<ResolvedParent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dam: Option<ResolvedParent>,
}

impl DateInconsistency {
    pub fn resolved(&self, role: ParentRole) -> Option<&ResolvedParent> {
        match role {
            ParentRole::Sire => self.sire.as_ref(),
            ParentRole::Dam => self.dam.as_ref(),
        }
    }
}

/// A parent reference the check refused to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedParent {
    pub child_id: Identifier,
    pub row: usize,
    pub role: ParentRole,
    pub parent_id: Identifier,
    /// Number of records registered under `parent_id`.
    pub registrations: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateConsistencyResult {
    /// In table order.
    pub inconsistencies: Vec<DateInconsistency>,
    /// Only populated under [`DuplicateParentPolicy::Skip`].
    pub unresolved: Vec<UnresolvedParent>,
}

impl DateConsistencyResult {
    pub fn count(&self) -> usize {
        self.inconsistencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inconsistencies.is_empty() && self.unresolved.is_empty()
    }
}

/// Birth date and registration count per identifier. Later records overwrite
/// earlier ones, including with an unset date.
struct BirthDateIndex<'a> {
    entries: HashMap<&'a str, (Option<NaiveDate>, usize)>,
}

impl<'a> BirthDateIndex<'a> {
    fn build(table: &'a PedigreeTable) -> Self {
        let mut entries: HashMap<&str, (Option<NaiveDate>, usize)> = HashMap::new();
        for record in table {
            let entry = entries.entry(record.id.as_str()).or_insert((None, 0));
            entry.0 = record.birth_date;
            entry.1 += 1;
        }
        Self { entries }
    }

    fn get(&self, id: &str) -> Option<(Option<NaiveDate>, usize)> {
        self.entries.get(id).copied()
    }
}

pub fn check_birth_dates(
    table: &PedigreeTable,
    policy: DuplicateParentPolicy,
) -> DateConsistencyResult {
    let index = BirthDateIndex::build(table);
    let mut result = DateConsistencyResult::default();
    let mut ambiguous_lookups = 0usize;

    for record in table {
        let Some(child_date) = record.birth_date else {
            continue;
        };

        let mut failing = DateInconsistency {
            child_id: record.id.clone(),
            row: record.row,
            child_birth_date: child_date,
            failing_roles: Vec::new(),
            sire: None,
            dam: None,
        };

        for role in [ParentRole::Sire, ParentRole::Dam] {
            let Some(parent_id) = record.parent(role).known() else {
                continue;
            };
            let Some((parent_date, registrations)) = index.get(parent_id.as_str()) else {
                continue;
            };

            let ambiguous = registrations > 1;
            if ambiguous && policy == DuplicateParentPolicy::Skip {
                result.unresolved.push(UnresolvedParent {
                    child_id: record.id.clone(),
                    row: record.row,
                    role,
                    parent_id: parent_id.clone(),
                    registrations,
                });
                continue;
            }

            let Some(parent_date) = parent_date else {
                continue;
            };
            if ambiguous {
                ambiguous_lookups += 1;
            }

            if child_date <= parent_date {
                let resolved = ResolvedParent {
                    id: parent_id.clone(),
                    birth_date: parent_date,
                    ambiguous,
                };
                failing.failing_roles.push(role);
                match role {
                    ParentRole::Sire => failing.sire = Some(resolved),
                    ParentRole::Dam => failing.dam = Some(resolved),
                }
            }
        }

        if !failing.failing_roles.is_empty() {
            result.inconsistencies.push(failing);
        }
    }

    if ambiguous_lookups > 0 {
        tracing::warn!(
            count = ambiguous_lookups,
            "parent birth dates resolved from duplicated identifiers (last record wins)"
        );
    }
    tracing::debug!(
        inconsistencies = result.inconsistencies.len(),
        unresolved = result.unresolved.len(),
        "birth date check"
    );
    result
}
