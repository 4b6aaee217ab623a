//! A validation session: one immutable table plus the options the checks run
//! with.

use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::OnceLock;

use crate::checks::{
    self, CheckKind, CycleError, CyclesResult, DateConsistencyResult, DualRoleResult,
    DuplicateParentPolicy, DuplicatesResult, MissingParentsResult, OffspringCountResult,
};
use crate::domain::{AncestryIndex, PedigreeTable};

/// Options shared by the checks of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub top_n: usize,
    pub duplicate_parents: DuplicateParentPolicy,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            top_n: checks::DEFAULT_TOP_N,
            duplicate_parents: DuplicateParentPolicy::default(),
        }
    }
}

/// Results of the checks that were run; absent checks were not requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_parents: Option<MissingParentsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<DuplicatesResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offspring: Option<OffspringCountResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dual_roles: Option<DualRoleResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_dates: Option<DateConsistencyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<CyclesResult>,
}

impl ValidationReport {
    /// Checks present in this report, in report order.
    pub fn checks_run(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                CheckKind::MissingParents => self.missing_parents.is_some(),
                CheckKind::Duplicates => self.duplicates.is_some(),
                CheckKind::Offspring => self.offspring.is_some(),
                CheckKind::DualRole => self.dual_roles.is_some(),
                CheckKind::BirthDates => self.birth_dates.is_some(),
                CheckKind::Cycles => self.cycles.is_some(),
            })
            .collect()
    }
}

/// Holds a normalized table for the duration of one validation pass.
///
/// The ancestry index is built on first use and shared by later calls.
#[derive(Debug)]
pub struct Session {
    table: PedigreeTable,
    options: CheckOptions,
    ancestry: OnceLock<AncestryIndex>,
}

impl Session {
    pub fn new(table: PedigreeTable, options: CheckOptions) -> Self {
        tracing::info!(records = table.len(), "validation session opened");
        Self {
            table,
            options,
            ancestry: OnceLock::new(),
        }
    }

    pub fn table(&self) -> &PedigreeTable {
        &self.table
    }

    pub fn ancestry(&self) -> &AncestryIndex {
        self.ancestry
            .get_or_init(|| AncestryIndex::build(&self.table))
    }

    pub fn missing_parents(&self) -> MissingParentsResult {
        checks::find_missing_parents(&self.table)
    }

    pub fn duplicates(&self) -> DuplicatesResult {
        checks::find_duplicates(&self.table)
    }

    pub fn offspring(&self) -> OffspringCountResult {
        checks::count_offspring(&self.table, self.options.top_n)
    }

    pub fn dual_roles(&self) -> DualRoleResult {
        checks::find_dual_roles(&self.table)
    }

    pub fn birth_dates(&self) -> DateConsistencyResult {
        checks::check_birth_dates(&self.table, self.options.duplicate_parents)
    }

    pub fn cycles(&self) -> CyclesResult {
        checks::find_cycles(self.ancestry())
    }

    pub fn cycles_cancellable(&self, cancel: &AtomicBool) -> Result<CyclesResult, CycleError> {
        checks::find_cycles_cancellable(self.ancestry(), cancel)
    }

    /// Run the requested checks (each at most once) into one report.
    pub fn run(
        &self,
        kinds: &[CheckKind],
        cancel: &AtomicBool,
    ) -> Result<ValidationReport, CycleError> {
        let mut report = ValidationReport {
            records: self.table.len(),
            ..Default::default()
        };

        for kind in kinds {
            match kind {
                CheckKind::MissingParents if report.missing_parents.is_none() => {
                    report.missing_parents = Some(self.missing_parents())
                }
                CheckKind::Duplicates if report.duplicates.is_none() => {
                    report.duplicates = Some(self.duplicates())
                }
                CheckKind::Offspring if report.offspring.is_none() => {
                    report.offspring = Some(self.offspring())
                }
                CheckKind::DualRole if report.dual_roles.is_none() => {
                    report.dual_roles = Some(self.dual_roles())
                }
                CheckKind::BirthDates if report.birth_dates.is_none() => {
                    report.birth_dates = Some(self.birth_dates())
                }
                CheckKind::Cycles if report.cycles.is_none() => {
                    report.cycles = Some(self.cycles_cancellable(cancel)?)
                }
                _ => {}
            }
        }

        Ok(report)
    }

    /// Run every check.
    pub fn run_all(&self) -> ValidationReport {
        let never = AtomicBool::new(false);
        self.run(&CheckKind::ALL, &never).unwrap_or_default()
    }
}
