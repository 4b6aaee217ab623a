//! Config command for showing the effective configuration

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use pedigree::config::Config;
use pedigree::paths::CONFIG_PATH;
use pedigree::ui::is_quiet;

/// Print the configuration that `check` would use, as a config file
pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if !is_quiet() {
        let source = match path {
            Some(path) => path.display().to_string(),
            None if Path::new(CONFIG_PATH).exists() => CONFIG_PATH.to_string(),
            None => "built-in defaults".to_string(),
        };
        println!("{} {}", "# Source:".dimmed(), source.dimmed());
    }
    print!("{}", config.to_markdown()?);
    Ok(())
}
