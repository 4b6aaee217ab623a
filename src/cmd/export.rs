//! Export command for writing one check's result to CSV or JSON
//!
//! Duplicate and dual-role exports carry the original record fields, so the
//! offending rows can be fixed in the source spreadsheet.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use pedigree::checks::{
    CheckKind, CyclesResult, DateConsistencyResult, DualRoleEntry, DuplicatesResult,
    MissingParentsResult, OffspringCountResult,
};
use pedigree::domain::{ParentRole, Record};
use pedigree::session::Session;
use pedigree::ui::{format, is_quiet};

use crate::cli::{ExportFormat, InputArgs};

/// Main export command handler
pub fn cmd_export(
    input: &InputArgs,
    check: CheckKind,
    output: &Path,
    export_format: ExportFormat,
    top: Option<usize>,
) -> Result<()> {
    let mut config = super::load_config(input)?;
    if let Some(top) = top {
        config.checks.top_n = top;
    }
    let session = super::open_session(input, &config)?;

    if check == CheckKind::DualRole && export_format == ExportFormat::Csv {
        let written = export_dual_roles_dir(&session, output)?;
        if !is_quiet() {
            println!(
                "{} Wrote {} to {}",
                "✓".green(),
                format::count(written, "file"),
                output.display()
            );
        }
        return Ok(());
    }

    let content = match export_format {
        ExportFormat::Json => export_json(&session, check)?,
        ExportFormat::Csv => export_csv(&session, check),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(output, content)
        .with_context(|| format!("Failed to write export to {}", output.display()))?;

    if !is_quiet() {
        println!("{} Export written to: {}", "✓".green(), output.display());
    }
    Ok(())
}

fn export_json(session: &Session, check: CheckKind) -> Result<String> {
    let json = match check {
        CheckKind::MissingParents => serde_json::to_string_pretty(&session.missing_parents()),
        CheckKind::Duplicates => serde_json::to_string_pretty(&session.duplicates()),
        CheckKind::Offspring => serde_json::to_string_pretty(&session.offspring()),
        CheckKind::DualRole => serde_json::to_string_pretty(&session.dual_roles()),
        CheckKind::BirthDates => serde_json::to_string_pretty(&session.birth_dates()),
        CheckKind::Cycles => serde_json::to_string_pretty(&session.cycles()),
    };
    json.context("Failed to serialize export")
}

fn export_csv(session: &Session, check: CheckKind) -> String {
    match check {
        CheckKind::MissingParents => missing_csv(&session.missing_parents()),
        CheckKind::Duplicates => duplicates_csv(session.table().headers(), &session.duplicates()),
        CheckKind::Offspring => offspring_csv(&session.offspring()),
        CheckKind::DualRole => {
            let result = session.dual_roles();
            let records: Vec<&Record> =
                result.entries.iter().flat_map(|e| e.records.iter()).collect();
            records_csv(session.table().headers(), records)
        }
        CheckKind::BirthDates => birth_dates_csv(&session.birth_dates()),
        CheckKind::Cycles => cycles_csv(&session.cycles()),
    }
}

/// Write one CSV per dual-role animal into `dir`. Returns the number of files.
fn export_dual_roles_dir(session: &Session, dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let result = session.dual_roles();
    for entry in &result.entries {
        let path = dir.join(format!("{}.csv", file_stem(entry)));
        let content = records_csv(session.table().headers(), entry.records.iter());
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(result.count())
}

fn file_stem(entry: &DualRoleEntry) -> String {
    entry
        .id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn missing_csv(result: &MissingParentsResult) -> String {
    let rows = result.missing.iter().map(|m| {
        vec![
            m.id.to_string(),
            m.as_sire.to_string(),
            m.as_dam.to_string(),
        ]
    });
    write_csv(&["id", "as_sire", "as_dam"], rows)
}

fn duplicates_csv(headers: &[String], result: &DuplicatesResult) -> String {
    records_csv(headers, result.groups.iter().flat_map(|g| g.records.iter()))
}

fn offspring_csv(result: &OffspringCountResult) -> String {
    let rows = [ParentRole::Sire, ParentRole::Dam].into_iter().flat_map(|role| {
        result
            .for_role(role)
            .iter()
            .enumerate()
            .map(move |(rank, tally)| {
                vec![
                    role.to_string(),
                    (rank + 1).to_string(),
                    tally.id.to_string(),
                    tally.count.to_string(),
                ]
            })
    });
    write_csv(&["role", "rank", "id", "offspring"], rows)
}

fn birth_dates_csv(result: &DateConsistencyResult) -> String {
    let rows = result.inconsistencies.iter().flat_map(|issue| {
        issue.failing_roles.iter().filter_map(move |&role| {
            issue.resolved(role).map(|parent| {
                vec![
                    issue.child_id.to_string(),
                    issue.row.to_string(),
                    issue.child_birth_date.to_string(),
                    role.to_string(),
                    parent.id.to_string(),
                    parent.birth_date.to_string(),
                    parent.ambiguous.to_string(),
                ]
            })
        })
    });
    write_csv(
        &[
            "child_id",
            "row",
            "child_birth_date",
            "role",
            "parent_id",
            "parent_birth_date",
            "ambiguous",
        ],
        rows,
    )
}

fn cycles_csv(result: &CyclesResult) -> String {
    let rows = result.cycles.iter().enumerate().map(|(index, cycle)| {
        let path: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
        vec![
            (index + 1).to_string(),
            cycle.len().saturating_sub(1).to_string(),
            path.join(" -> "),
        ]
    });
    write_csv(&["cycle", "length", "path"], rows)
}

/// Original record fields, prefixed with the 1-based data row.
fn records_csv<'a>(headers: &[String], records: impl IntoIterator<Item = &'a Record>) -> String {
    let mut columns = vec!["row"];
    columns.extend(headers.iter().map(|h| h.as_str()));

    let rows = records.into_iter().map(|record| {
        let mut row = vec![record.row.to_string()];
        row.extend(record.fields.iter().cloned());
        row
    });
    write_csv(&columns, rows)
}

fn write_csv(headers: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut output = String::new();
    let header: Vec<String> = headers.iter().map(|h| csv_escape(h)).collect();
    output.push_str(&header.join(","));
    output.push('\n');

    for row in rows {
        let values: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
        output.push_str(&values.join(","));
        output.push('\n');
    }

    output
}

/// Escape a value for CSV output
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedigree::checks::DuplicateParentPolicy;
    use pedigree::domain::{CellValue, ColumnMapping, Normalizer, PedigreeTable, RawTable};
    use pedigree::session::CheckOptions;

    fn session(rows: &[[&str; 4]]) -> Session {
        let raw = RawTable {
            headers: vec!["ID".into(), "Vader".into(), "Moeder".into(), "Geboortedatum".into()],
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
                .collect(),
        };
        let table =
            PedigreeTable::from_raw(&raw, &ColumnMapping::default(), &Normalizer::default())
                .unwrap();
        Session::new(
            table,
            CheckOptions {
                top_n: 20,
                duplicate_parents: DuplicateParentPolicy::LastWins,
            },
        )
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("simple"), "simple");
        assert_eq!(csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(csv_escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(csv_escape("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_missing_parents_csv() {
        let session = session(&[["1", "S", "D", ""], ["2", "S", "0", ""]]);
        let csv = export_csv(&session, CheckKind::MissingParents);
        assert_eq!(csv, "id,as_sire,as_dam\nD,0,1\nS,2,0\n");
    }

    #[test]
    fn test_duplicates_csv_keeps_original_fields() {
        let session = session(&[
            ["7", "0", "0", "1-1-1990"],
            ["8", "0", "0", ""],
            ["7", "0", "0", "2-1-1990"],
        ]);
        let csv = export_csv(&session, CheckKind::Duplicates);
        assert_eq!(
            csv,
            "row,ID,Vader,Moeder,Geboortedatum\n1,7,0,0,1-1-1990\n3,7,0,0,2-1-1990\n"
        );
    }

    #[test]
    fn test_offspring_csv() {
        let session = session(&[["1", "S", "D", ""], ["2", "S", "D", ""], ["3", "T", "0", ""]]);
        let csv = export_csv(&session, CheckKind::Offspring);
        assert_eq!(
            csv,
            "role,rank,id,offspring\nsire,1,S,2\nsire,2,T,1\ndam,1,D,2\n"
        );
    }

    #[test]
    fn test_birth_dates_csv() {
        let session = session(&[
            ["15", "141209548", "141209555", "1-1-1941"],
            ["141209548", "0", "0", "1-1-1970"],
            ["141209555", "0", "0", "1-1-1967"],
        ]);
        let csv = export_csv(&session, CheckKind::BirthDates);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "15,1,1941-01-01,sire,141209548,1970-01-01,false");
        assert_eq!(lines[2], "15,1,1941-01-01,dam,141209555,1967-01-01,false");
    }

    #[test]
    fn test_cycles_csv() {
        let session = session(&[["A", "B", "0", ""], ["B", "A", "0", ""]]);
        let csv = export_csv(&session, CheckKind::Cycles);
        assert_eq!(csv, "cycle,length,path\n1,2,A -> B -> A\n");
    }

    #[test]
    fn test_dual_roles_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let session = session(&[["1", "X/1", "D", ""], ["2", "S", "X/1", ""]]);
        let written = export_dual_roles_dir(&session, tmp.path()).unwrap();

        assert_eq!(written, 1);
        let content = fs::read_to_string(tmp.path().join("X_1.csv")).unwrap();
        assert_eq!(
            content,
            "row,ID,Vader,Moeder,Geboortedatum\n1,1,X/1,D,\n2,2,S,X/1,\n"
        );
    }

    #[test]
    fn test_json_export() {
        let session = session(&[["A", "A", "0", ""]]);
        let json = export_json(&session, CheckKind::Cycles).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cycles"], serde_json::json!([["A", "A"]]));
    }
}
