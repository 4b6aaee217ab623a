//! Check command: run checks over a pedigree file and report the findings

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pedigree::checks::{CheckKind, DuplicateParentPolicy};
use pedigree::formatters::{format_json_report, format_text_report};
use pedigree::ui::is_quiet;
use pedigree::validation::{summarize, ValidationTotals};

use crate::cli::{InputArgs, ReportFormat};

/// Main check command handler
pub fn cmd_check(
    input: &InputArgs,
    checks: &[CheckKind],
    top: Option<usize>,
    duplicate_parents: Option<DuplicateParentPolicy>,
    format: ReportFormat,
) -> Result<()> {
    let mut config = super::load_config(input)?;
    if let Some(top) = top {
        config.checks.top_n = top;
    }
    if let Some(policy) = duplicate_parents {
        config.checks.duplicate_parents = policy;
    }

    let session = super::open_session(input, &config)?;
    let kinds = if checks.is_empty() {
        config.checks.enabled.clone()
    } else {
        checks.to_vec()
    };

    let cancel = install_interrupt_handler();
    let report = session
        .run(&kinds, &cancel)
        .context("Check interrupted")?;

    let results = summarize(&report, config.checks.offspring_warn_threshold);
    let totals = ValidationTotals::of(&results);

    match format {
        ReportFormat::Json => println!("{}", format_json_report(&report, &results)?),
        ReportFormat::Text => {
            if !is_quiet() {
                println!("{}", format_text_report(&report, &results));
            }
            totals.display_summary(&results);
        }
    }

    totals.exit_if_failed();
    Ok(())
}

/// Flag set by Ctrl+C; a second Ctrl+C exits immediately.
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let _ = ctrlc::set_handler(move || {
        if flag.load(Ordering::SeqCst) {
            eprintln!("\n{} Force exit", "✗".red());
            std::process::exit(130);
        }
        eprintln!(
            "\n{} Interrupt received - stopping after the current traversal...",
            "→".yellow()
        );
        flag.store(true, Ordering::SeqCst);
    });
    cancel
}
