//! Checks run through a session over tables built the way a reader builds them.

use std::sync::atomic::AtomicBool;

use pedigree::checks::{CheckKind, DuplicateParentPolicy};
use pedigree::domain::{Identifier, ParentRole};
use pedigree::session::{CheckOptions, Session};

use crate::support::builders::TableBuilder;

fn ids(values: &[&str]) -> Vec<Identifier> {
    values.iter().map(|v| Identifier::from(*v)).collect()
}

#[test]
fn test_reference_sample_end_to_end() {
    let table = TableBuilder::new()
        .row("15", "141209548", "141209555", "1-1-1941")
        .row("141209548", "0", "0", "1-1-1970")
        .row("141209555", "0", "0", "1-1-1967")
        .build();
    let report = Session::new(table, CheckOptions::default()).run_all();

    assert!(report.missing_parents.as_ref().unwrap().is_empty());
    assert!(report.duplicates.as_ref().unwrap().is_empty());
    assert!(report.dual_roles.as_ref().unwrap().is_empty());
    assert!(report.cycles.as_ref().unwrap().is_empty());

    let dates = report.birth_dates.unwrap();
    assert_eq!(dates.count(), 1);
    assert_eq!(dates.inconsistencies[0].child_id.as_str(), "15");
    assert_eq!(
        dates.inconsistencies[0].failing_roles,
        vec![ParentRole::Sire, ParentRole::Dam]
    );
}

#[test]
fn test_two_digit_year_parent_compares_as_full_year() {
    let table = TableBuilder::new()
        .row("C", "S", "D", "1-1-1970")
        .row("S", "0", "0", "1-1-70")
        .row("D", "0", "0", "01/01/1965")
        .build();
    let dates = Session::new(table, CheckOptions::default()).birth_dates();

    assert_eq!(dates.count(), 1);
    assert_eq!(dates.inconsistencies[0].child_id.as_str(), "C");
    assert_eq!(dates.inconsistencies[0].failing_roles, vec![ParentRole::Sire]);
}

#[test]
fn test_numeric_and_text_ids_match() {
    let table = TableBuilder::new()
        .numeric_row(15.0, 141209548.0, 0.0)
        .row("141209548", "0", "0", "")
        .build();
    let session = Session::new(table, CheckOptions::default());

    assert!(session.missing_parents().is_empty());
    assert_eq!(
        session.ancestry().parents_of("15"),
        vec![&Identifier::from("141209548")]
    );
}

#[test]
fn test_missing_parents_sorted_and_idempotent() {
    let table = TableBuilder::new()
        .row("1", "Z", "M", "")
        .row("2", "A", "0", "")
        .row("3", "1", "nan", "")
        .build();
    let session = Session::new(table, CheckOptions::default());

    let first = session.missing_parents();
    let second = session.missing_parents();
    assert_eq!(first, second);
    assert_eq!(first.ids().cloned().collect::<Vec<_>>(), ids(&["A", "M", "Z"]));
}

#[test]
fn test_offspring_ordering_and_truncation() {
    let mut builder = TableBuilder::new();
    let rows = [
        ("1", "S2", "D1"),
        ("2", "S1", "D1"),
        ("3", "S2", "D2"),
        ("4", "S1", "0"),
        ("5", "S3", "0"),
    ];
    for (id, sire, dam) in rows {
        builder = builder.row(id, sire, dam, "");
    }
    let session = Session::new(
        builder.build(),
        CheckOptions {
            top_n: 2,
            ..Default::default()
        },
    );
    let result = session.offspring();

    let sires: Vec<(&str, usize)> = result
        .top_sires
        .iter()
        .map(|t| (t.id.as_str(), t.count))
        .collect();
    assert_eq!(sires, vec![("S1", 2), ("S2", 2)]);
    assert_eq!(result.top_dams[0].id.as_str(), "D1");
    assert_eq!(result.top_dams.len(), 2);
}

#[test]
fn test_duplicate_parent_policy_changes_date_check() {
    let build = || {
        TableBuilder::new()
            .row("C", "S", "0", "1-1-1980")
            .row("S", "0", "0", "1-1-1970")
            .row("S", "0", "0", "1-1-1985")
            .build()
    };

    let last_wins = Session::new(build(), CheckOptions::default()).birth_dates();
    assert_eq!(last_wins.count(), 1);
    assert!(last_wins.inconsistencies[0].sire.as_ref().unwrap().ambiguous);

    let skip = Session::new(
        build(),
        CheckOptions {
            duplicate_parents: DuplicateParentPolicy::Skip,
            ..Default::default()
        },
    )
    .birth_dates();
    assert_eq!(skip.count(), 0);
    assert_eq!(skip.unresolved.len(), 1);
}

#[test]
fn test_cycles_through_both_roles() {
    let table = TableBuilder::new()
        .row("A", "B", "0", "")
        .row("B", "0", "C", "")
        .row("C", "A", "0", "")
        .row("X", "X", "0", "")
        .row("Q", "0", "0", "")
        .build();
    let cycles = Session::new(table, CheckOptions::default()).cycles();

    assert_eq!(
        cycles.cycles,
        vec![ids(&["A", "B", "C", "A"]), ids(&["X", "X"])]
    );
}

#[test]
fn test_cancelled_session_run() {
    let table = TableBuilder::new().row("A", "B", "0", "").build();
    let session = Session::new(table, CheckOptions::default());
    let cancel = AtomicBool::new(true);

    assert!(session.run(&[CheckKind::Cycles], &cancel).is_err());
    let report = session
        .run(&[CheckKind::MissingParents], &cancel)
        .unwrap();
    assert_eq!(report.missing_parents.unwrap().count(), 1);
}
