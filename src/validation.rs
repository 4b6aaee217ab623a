//! Severity classification of check results.
//!
//! Check results are plain data; this module turns them into issues with a
//! severity so the CLI can print them uniformly and decide the exit status.

use colored::Colorize;

use crate::ui::colors;
use serde::Serialize;

use crate::checks::{
    CheckKind, CyclesResult, DateConsistencyResult, DualRoleResult, DuplicatesResult,
    MissingParentsResult, OffspringCountResult,
};
use crate::domain::ParentRole;
use crate::session::ValidationReport;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - worth a look but not a data defect by itself
    Warning,
    /// Error - the pedigree is inconsistent
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Check that found this issue
    pub check: CheckKind,
    /// Identifier of the animal concerned
    pub item_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        check: CheckKind,
        item_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            check,
            item_id: item_id.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion to this issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Render the issue with colored output
    pub fn render(&self) -> String {
        let icon = match self.severity {
            Severity::Warning => colors::warning("⚠"),
            Severity::Error => colors::error("✗"),
        };

        let mut line = format!(
            "  {} {} [{}]: {}",
            icon,
            self.item_id.cyan(),
            self.check,
            self.message
        );
        if let Some(ref suggestion) = self.suggestion {
            line.push_str(&format!("\n      {} {}", "→".cyan(), suggestion));
        }
        line
    }
}

/// Issues found by one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub check: CheckKind,
    /// Number of findings the check reported
    pub total: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new(check: CheckKind) -> Self {
        Self {
            check,
            total: 0,
            issues: Vec::new(),
        }
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// One-line summary such as `✗ Birth dates: 1 error`.
    pub fn summary_line(&self) -> String {
        let status_icon = if self.is_valid() {
            colors::success("✓")
        } else {
            colors::error("✗")
        };

        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(
                format!("{} {}", errors, if errors == 1 { "error" } else { "errors" })
                    .red()
                    .to_string(),
            );
        }
        if warnings > 0 {
            parts.push(
                format!(
                    "{} {}",
                    warnings,
                    if warnings == 1 { "warning" } else { "warnings" }
                )
                .yellow()
                .to_string(),
            );
        }
        if parts.is_empty() {
            parts.push(colors::success("ok").to_string());
        }

        format!("{} {}: {}", status_icon, self.check.title(), parts.join(", "))
    }
}

/// Totals across every check of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationTotals {
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationTotals {
    pub fn of(results: &[ValidationResult]) -> Self {
        results.iter().fold(Self::default(), |acc, r| Self {
            errors: acc.errors + r.count(Severity::Error),
            warnings: acc.warnings + r.count(Severity::Warning),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    /// Display a summary footer
    pub fn display_summary(&self, results: &[ValidationResult]) {
        println!();
        println!("{}", "━".repeat(60).cyan());
        for result in results {
            println!("{}", result.summary_line());
        }
        if self.errors > 0 || self.warnings > 0 {
            println!(
                "  {} {}, {} {}",
                self.errors,
                colors::error("errors"),
                self.warnings,
                colors::warning("warnings")
            );
        }
        println!("{}", "━".repeat(60).cyan());
    }

    /// Exit with status 1 when any error-severity issue was found
    pub fn exit_if_failed(&self) {
        if !self.is_valid() {
            std::process::exit(1);
        }
    }
}

/// Classify every check present in the report. Parents with more offspring
/// than `offspring_warn_threshold` are reported as warnings.
pub fn summarize(
    report: &ValidationReport,
    offspring_warn_threshold: Option<usize>,
) -> Vec<ValidationResult> {
    let mut results = Vec::new();
    if let Some(ref missing) = report.missing_parents {
        results.push(summarize_missing(missing));
    }
    if let Some(ref duplicates) = report.duplicates {
        results.push(summarize_duplicates(duplicates));
    }
    if let Some(ref offspring) = report.offspring {
        results.push(summarize_offspring(offspring, offspring_warn_threshold));
    }
    if let Some(ref dual_roles) = report.dual_roles {
        results.push(summarize_dual_roles(dual_roles));
    }
    if let Some(ref dates) = report.birth_dates {
        results.push(summarize_birth_dates(dates));
    }
    if let Some(ref cycles) = report.cycles {
        results.push(summarize_cycles(cycles));
    }
    results
}

fn summarize_missing(missing: &MissingParentsResult) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::MissingParents);
    result.total = missing.count();
    for parent in &missing.missing {
        result.add_issue(
            ValidationIssue::new(
                Severity::Warning,
                CheckKind::MissingParents,
                parent.id.as_str(),
                format!(
                    "referenced as sire {} and as dam {} times but not registered",
                    parent.as_sire, parent.as_dam
                ),
            )
            .with_suggestion("Add a record for this animal, or use 0 for an unknown parent"),
        );
    }
    result
}

fn summarize_duplicates(duplicates: &DuplicatesResult) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::Duplicates);
    result.total = duplicates.count();
    for group in &duplicates.groups {
        let rows: Vec<String> = group.records.iter().map(|r| r.row.to_string()).collect();
        result.add_issue(ValidationIssue::new(
            Severity::Error,
            CheckKind::Duplicates,
            group.id.as_str(),
            format!(
                "registered {} times (rows {})",
                group.records.len(),
                rows.join(", ")
            ),
        ));
    }
    result
}

fn summarize_offspring(
    offspring: &OffspringCountResult,
    threshold: Option<usize>,
) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::Offspring);
    result.total = offspring.top_sires.len() + offspring.top_dams.len();
    let Some(threshold) = threshold else {
        return result;
    };

    for role in [ParentRole::Sire, ParentRole::Dam] {
        for tally in offspring.for_role(role) {
            if tally.count > threshold {
                result.add_issue(ValidationIssue::new(
                    Severity::Warning,
                    CheckKind::Offspring,
                    tally.id.as_str(),
                    format!(
                        "{} offspring as {} (threshold {})",
                        tally.count, role, threshold
                    ),
                ));
            }
        }
    }
    result
}

fn summarize_dual_roles(dual_roles: &DualRoleResult) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::DualRole);
    result.total = dual_roles.count();
    for entry in &dual_roles.entries {
        result.add_issue(ValidationIssue::new(
            Severity::Error,
            CheckKind::DualRole,
            entry.id.as_str(),
            format!(
                "recorded as sire {} times and as dam {} times",
                entry.as_sire, entry.as_dam
            ),
        ));
    }
    result
}

fn summarize_birth_dates(dates: &DateConsistencyResult) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::BirthDates);
    result.total = dates.count() + dates.unresolved.len();

    for inconsistency in &dates.inconsistencies {
        let parents: Vec<String> = inconsistency
            .failing_roles
            .iter()
            .filter_map(|&role| {
                inconsistency.resolved(role).map(|parent| {
                    let marker = if parent.ambiguous { ", duplicated id" } else { "" };
                    format!("{} {} born {}{}", role, parent.id, parent.birth_date, marker)
                })
            })
            .collect();
        result.add_issue(ValidationIssue::new(
            Severity::Error,
            CheckKind::BirthDates,
            inconsistency.child_id.as_str(),
            format!(
                "born {} but not after {} (row {})",
                inconsistency.child_birth_date,
                parents.join(" and "),
                inconsistency.row
            ),
        ));
    }

    for unresolved in &dates.unresolved {
        result.add_issue(
            ValidationIssue::new(
                Severity::Warning,
                CheckKind::BirthDates,
                unresolved.child_id.as_str(),
                format!(
                    "{} {} is registered {} times; birth date not compared (row {})",
                    unresolved.role, unresolved.parent_id, unresolved.registrations, unresolved.row
                ),
            )
            .with_suggestion("Resolve the duplicate identifier first"),
        );
    }
    result
}

fn summarize_cycles(cycles: &CyclesResult) -> ValidationResult {
    let mut result = ValidationResult::new(CheckKind::Cycles);
    result.total = cycles.count();
    for cycle in &cycles.cycles {
        let path: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
        let first = path.first().copied().unwrap_or_default();
        result.add_issue(ValidationIssue::new(
            Severity::Error,
            CheckKind::Cycles,
            first,
            format!("is its own ancestor: {}", path.join(" -> ")),
        ));
    }
    result
}
