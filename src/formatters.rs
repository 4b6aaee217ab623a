//! Output formatters for validation reports
//!
//! Text output for people and JSON output for tools. Both take the report the
//! session produced plus the severity summary built from it.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::checks::{CheckKind, OffspringCountResult, ParentTally};
use crate::domain::ParentRole;
use crate::session::ValidationReport;
use crate::ui::{colors, format};
use crate::validation::{ValidationResult, ValidationTotals};

/// Format a report as multi-section text output
pub fn format_text_report(report: &ValidationReport, results: &[ValidationResult]) -> String {
    let mut output = vec![
        "Pedigree Report".bold().to_string(),
        "===============".to_string(),
        format!("  {:<10} {}", "Records:", report.records),
        String::new(),
    ];

    for result in results {
        let title = format!("{} ({})", result.check.title(), result.total);
        output.push(colors::heading(&title).to_string());
        output.push(format::underline(&title));

        if result.check == CheckKind::Offspring {
            if let Some(ref offspring) = report.offspring {
                output.extend(format_offspring(offspring));
            }
        }

        if result.issues.is_empty() && result.check != CheckKind::Offspring {
            output.push(colors::secondary("  (none found)").to_string());
        }
        for issue in &result.issues {
            output.push(issue.render());
        }
        output.push(String::new());
    }

    output.join("\n")
}

fn format_offspring(offspring: &OffspringCountResult) -> Vec<String> {
    let mut lines = Vec::new();
    for role in [ParentRole::Sire, ParentRole::Dam] {
        let tallies = offspring.for_role(role);
        let label = match role {
            ParentRole::Sire => "Top sires",
            ParentRole::Dam => "Top dams",
        };
        lines.push(format!("  {}", label.bold()));
        if tallies.is_empty() {
            lines.push(colors::secondary("    (no known parents)").to_string());
        }
        for (rank, tally) in tallies.iter().enumerate() {
            lines.push(format_tally(rank + 1, tally));
        }
    }
    lines
}

fn format_tally(rank: usize, tally: &ParentTally) -> String {
    format!(
        "    {:>3}. {:<20} {}",
        rank,
        colors::identifier(tally.id.as_str()),
        format::count(tally.count, "offspring record")
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ValidationReport,
    issues: Vec<&'a crate::validation::ValidationIssue>,
    totals: ValidationTotals,
}

/// Format a report as pretty-printed JSON: the raw check results, every
/// issue with its severity, and the totals.
pub fn format_json_report(
    report: &ValidationReport,
    results: &[ValidationResult],
) -> Result<String> {
    let json = JsonReport {
        report,
        issues: results.iter().flat_map(|r| r.issues.iter()).collect(),
        totals: ValidationTotals::of(results),
    };
    serde_json::to_string_pretty(&json).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{dated_table, table};
    use crate::session::{CheckOptions, Session};
    use crate::validation::summarize;

    fn sample() -> (ValidationReport, Vec<ValidationResult>) {
        let session = Session::new(
            dated_table(&[
                ("15", "141209548", "141209555", Some("1941-01-01")),
                ("141209548", "0", "0", Some("1970-01-01")),
                ("141209555", "0", "0", Some("1967-01-01")),
            ]),
            CheckOptions::default(),
        );
        let report = session.run_all();
        let results = summarize(&report, None);
        (report, results)
    }

    #[test]
    fn test_text_report_sections() {
        colored::control::set_override(false);
        let (report, results) = sample();
        let text = format_text_report(&report, &results);

        assert!(text.contains("Records:   3"));
        assert!(text.contains("Missing parents (0)"));
        assert!(text.contains("Birth date consistency (1)"));
        assert!(text.contains("Top sires"));
        assert!(text.contains("141209548"));
        assert!(text.contains("(none found)"));
    }

    #[test]
    fn test_text_report_only_requested_checks() {
        let session = Session::new(table(&[("A", "B", "0")]), CheckOptions::default());
        let never = std::sync::atomic::AtomicBool::new(false);
        let report = session.run(&[CheckKind::Cycles], &never).unwrap();
        let results = summarize(&report, None);
        let text = format_text_report(&report, &results);

        assert!(text.contains("Circular references"));
        assert!(!text.contains("Missing parents"));
    }

    #[test]
    fn test_json_report() {
        let (report, results) = sample();
        let json = format_json_report(&report, &results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["records"], 3);
        assert_eq!(value["totals"]["errors"], 1);
        assert_eq!(value["issues"][0]["check"], "birth-dates");
        assert_eq!(value["issues"][0]["severity"], "error");
        assert_eq!(
            value["birth_dates"]["inconsistencies"][0]["failing_roles"],
            serde_json::json!(["sire", "dam"])
        );
        assert_eq!(value["cycles"]["cycles"], serde_json::json!([]));
    }
}
