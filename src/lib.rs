//! # Pedigree - data-quality checks for studbooks
//!
//! Reads a pedigree table (one row per animal with its sire, dam and birth
//! date) and reports the defects that make a studbook untrustworthy before it
//! is used for breeding-value or inbreeding calculations.
//!
//! ## Checks
//!
//! - **Missing parents**: parents referenced but never registered
//! - **Duplicates**: identifiers registered more than once
//! - **Offspring counts**: most prolific sires and dams, for review
//! - **Dual roles**: animals recorded both as sire and as dam
//! - **Birth dates**: offspring born on or before a parent
//! - **Cycles**: animals that are their own ancestor
//!
//! ## Modules
//!
//! - [`domain`] - Normalized values, records and the ancestry index
//! - [`checks`] - The independent checks over a table
//! - [`session`] - One table plus options, running any subset of checks
//! - [`reader`] - Delimited and JSON input
//! - [`config`] - `.pedigree/config.md` settings
//! - [`validation`] - Severity classification of check results
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use pedigree::config::Config;
//! use pedigree::session::Session;
//!
//! let config = Config::load().expect("Failed to load config");
//! let table = pedigree::load_table(Path::new("studbook.csv"), &config)
//!     .expect("Failed to read studbook");
//!
//! let session = Session::new(table, config.check_options());
//! let cycles = session.cycles();
//! for cycle in &cycles.cycles {
//!     println!("circular reference: {:?}", cycle);
//! }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

pub mod checks;
pub mod config;
pub mod domain;
pub mod formatters;
pub mod reader;
pub mod session;
pub mod ui;
pub mod validation;

/// Default path constants.
pub mod paths {
    /// Project config file: `.pedigree/config.md`
    pub const CONFIG_PATH: &str = ".pedigree/config.md";
}

/// Read and normalize a pedigree file using the input section of `config`.
pub fn load_table(path: &Path, config: &config::Config) -> Result<domain::PedigreeTable> {
    let raw = reader::read_path(path, config.input.separator)
        .with_context(|| format!("Failed to read pedigree from {}", path.display()))?;

    domain::PedigreeTable::from_raw(&raw, &config.input.columns, &config.normalizer())
        .with_context(|| format!("Invalid pedigree table in {}", path.display()))
}
