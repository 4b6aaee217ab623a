//! Independent data-quality checks over a [`PedigreeTable`].
//!
//! Each check reads the table and returns its own result; none of them
//! depends on another's output.
//!
//! [`PedigreeTable`]: crate::domain::PedigreeTable

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod cycles;
pub mod dates;
pub mod dual_role;
pub mod duplicates;
pub mod missing;
pub mod offspring;

pub use cycles::{find_cycles, find_cycles_cancellable, CycleError, CyclesResult};
pub use dates::{
    check_birth_dates, DateConsistencyResult, DateInconsistency, DuplicateParentPolicy,
    ResolvedParent, UnresolvedParent,
};
pub use dual_role::{find_dual_roles, DualRoleEntry, DualRoleResult};
pub use duplicates::{find_duplicates, DuplicateGroup, DuplicatesResult};
pub use missing::{find_missing_parents, MissingParent, MissingParentsResult};
pub use offspring::{count_offspring, OffspringCountResult, ParentTally, DEFAULT_TOP_N};

/// The available checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    MissingParents,
    Duplicates,
    Offspring,
    DualRole,
    BirthDates,
    Cycles,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::MissingParents,
        CheckKind::Duplicates,
        CheckKind::Offspring,
        CheckKind::DualRole,
        CheckKind::BirthDates,
        CheckKind::Cycles,
    ];

    /// Human-readable title used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            CheckKind::MissingParents => "Missing parents",
            CheckKind::Duplicates => "Duplicate identifiers",
            CheckKind::Offspring => "Offspring counts",
            CheckKind::DualRole => "Dual-role animals",
            CheckKind::BirthDates => "Birth date consistency",
            CheckKind::Cycles => "Circular references",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::MissingParents => "missing-parents",
            CheckKind::Duplicates => "duplicates",
            CheckKind::Offspring => "offspring",
            CheckKind::DualRole => "dual-role",
            CheckKind::BirthDates => "birth-dates",
            CheckKind::Cycles => "cycles",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CheckKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "missing-parents" | "missing" => Ok(CheckKind::MissingParents),
            "duplicates" | "dupes" => Ok(CheckKind::Duplicates),
            "offspring" => Ok(CheckKind::Offspring),
            "dual-role" | "dual-roles" => Ok(CheckKind::DualRole),
            "birth-dates" | "dates" => Ok(CheckKind::BirthDates),
            "cycles" => Ok(CheckKind::Cycles),
            other => anyhow::bail!(
                "Unknown check: {}. Available checks: {}",
                other,
                CheckKind::ALL
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
