//! CLI argument definitions for pedigree.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use pedigree::checks::{CheckKind, DuplicateParentPolicy};
use pedigree::domain::ColumnRef;
use pedigree::reader::Separator;

#[derive(Parser)]
#[command(name = "pedigree")]
#[command(version)]
#[command(about = "Data-quality checks for pedigree tables", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    pedigree check studbook.csv                     Run every check\n    pedigree check studbook.csv --check cycles      Run one check\n    pedigree check data.txt --separator ';' --id ID --sire Vader --dam Moeder\n    pedigree export studbook.csv --check dual-role --output dual-role/"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the pedigree comes from and how to read it
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Pedigree file (delimited text, or a JSON array of objects if it ends in .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator: comma, semicolon, tab or pipe (also ',', ';', '|')
    #[arg(long, short = 's', value_name = "SEP")]
    pub separator: Option<Separator>,

    /// Identifier column, by header name or 0-based index (default: 0)
    #[arg(long, value_name = "COL")]
    pub id: Option<ColumnRef>,

    /// Sire column, by header name or 0-based index (default: 1)
    #[arg(long, value_name = "COL")]
    pub sire: Option<ColumnRef>,

    /// Dam column, by header name or 0-based index (default: 2)
    #[arg(long, value_name = "COL")]
    pub dam: Option<ColumnRef>,

    /// Birth-date column, by header name or 0-based index (default: 3)
    #[arg(long, value_name = "COL", conflicts_with = "no_birth_date")]
    pub birth_date: Option<ColumnRef>,

    /// The file has no birth-date column
    #[arg(long)]
    pub no_birth_date: bool,

    /// Config file (default: .pedigree/config.md when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run checks and print a report
    ///
    /// Exits with status 1 when a check finds an error: duplicate identifiers,
    /// dual-role animals, offspring born before a parent, or circular
    /// references. Missing parents are reported as warnings.
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Check to run (can be specified multiple times; default: all enabled in config)
        #[arg(long = "check", short = 'c', value_name = "KIND")]
        checks: Vec<CheckKind>,
        /// Number of sires and dams listed in the offspring counts
        #[arg(long, value_name = "N")]
        top: Option<usize>,
        /// How to treat a parent registered more than once in the birth-date check
        #[arg(long, value_name = "POLICY")]
        duplicate_parents: Option<DuplicateParentPolicy>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// Write the result of one check to a file
    ///
    /// For dual-role with CSV output, --output is a directory and one CSV per
    /// animal is written, holding every record that names it as a parent.
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Check whose result is exported
        #[arg(long = "check", short = 'c', value_name = "KIND")]
        check: CheckKind,
        /// Output file (or directory, for dual-role CSV)
        #[arg(long, short = 'o', value_name = "PATH")]
        output: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Number of sires and dams exported for offspring counts
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
    /// Show the effective configuration
    Config {
        /// Config file (default: .pedigree/config.md when present)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Show version information (with -v, also the commit and build date)
    Version,
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate man page
    Man {
        /// Output directory for the man page (defaults to current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
