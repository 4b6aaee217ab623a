//! Utility commands (version, man pages, shell completion).

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

const BIN_NAME: &str = "pedigree";

pub fn cmd_version(verbose: bool) -> Result<()> {
    println!("{} {}", BIN_NAME, env!("CARGO_PKG_VERSION"));
    if verbose {
        println!("commit: {}", env!("GIT_SHA"));
        println!("built: {}", env!("BUILD_DATE"));
    }
    Ok(())
}

/// Write `pedigree.1` plus one `pedigree-<command>.1` page per subcommand.
pub fn cmd_man(out_dir: Option<&PathBuf>) -> Result<()> {
    let dir = out_dir.map(PathBuf::as_path).unwrap_or(Path::new("."));
    for page in write_man_pages(dir)? {
        println!("Man page written to: {}", page.display());
    }
    Ok(())
}

fn write_man_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let root = Cli::command();
    let mut pages = vec![(BIN_NAME.to_string(), root.clone())];
    for sub in root.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        pages.push((format!("{}-{}", BIN_NAME, sub.get_name()), sub.clone()));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (name, command) in pages {
        let mut buffer = Vec::new();
        clap_mangen::Man::new(command)
            .title(name.to_uppercase())
            .render(&mut buffer)?;
        let path = dir.join(format!("{}.1", name));
        std::fs::write(&path, buffer)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote man page");
        written.push(path);
    }
    Ok(written)
}

pub fn cmd_completion(shell: Shell) -> Result<()> {
    write_completion(shell, &mut io::stdout())
}

fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, BIN_NAME, out);
    Ok(())
}
