//! CLI entry point and command dispatch for pedigree.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Windows defaults to a 1 MB main-thread stack; match the Linux default.
    const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

    let thread = std::thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(run)?;

    match thread.join() {
        Ok(result) => result,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.quiet {
        std::env::set_var("PEDIGREE_QUIET", "1");
    }

    match cli.command {
        Commands::Check {
            input,
            checks,
            top,
            duplicate_parents,
            format,
        } => cmd::check::cmd_check(&input, &checks, top, duplicate_parents, format),
        Commands::Export {
            input,
            check,
            output,
            format,
            top,
        } => cmd::export::cmd_export(&input, check, &output, format, top),
        Commands::Config { config } => cmd::config::cmd_config(config.as_deref()),
        Commands::Version => cmd::util::cmd_version(cli.verbose > 0),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
        Commands::Man { out_dir } => cmd::util::cmd_man(out_dir.as_ref()),
    }
}

/// Log to stderr so report output on stdout stays machine-readable.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "pedigree=warn",
        1 => "pedigree=info",
        _ => "pedigree=debug",
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
