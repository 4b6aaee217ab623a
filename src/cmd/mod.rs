//! Command module structure for the pedigree CLI

use anyhow::Result;

use pedigree::config::Config;
use pedigree::session::Session;

use crate::cli::InputArgs;

pub mod check;
pub mod config;
pub mod export;
pub mod util;

/// Load the config named by `--config` (or the project default) and apply
/// the input flags on top of it.
pub fn load_config(input: &InputArgs) -> Result<Config> {
    let mut config = Config::load_or_default(input.config.as_deref())?;
    apply_input_overrides(input, &mut config);
    Ok(config)
}

fn apply_input_overrides(input: &InputArgs, config: &mut Config) {
    let columns = &mut config.input.columns;
    if let Some(ref id) = input.id {
        columns.id = id.clone();
    }
    if let Some(ref sire) = input.sire {
        columns.sire = sire.clone();
    }
    if let Some(ref dam) = input.dam {
        columns.dam = dam.clone();
    }
    if input.no_birth_date {
        columns.birth_date = None;
    } else if let Some(ref birth_date) = input.birth_date {
        columns.birth_date = Some(birth_date.clone());
    }
    if let Some(separator) = input.separator {
        config.input.separator = separator;
    }
}

/// Read the input file into a session.
pub fn open_session(input: &InputArgs, config: &Config) -> Result<Session> {
    config.validate()?;
    let table = pedigree::load_table(&input.file, config)?;
    Ok(Session::new(table, config.check_options()))
}
