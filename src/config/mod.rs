//! Configuration for pedigree checks.
//!
//! The config file is Markdown with YAML frontmatter (`.pedigree/config.md` by
//! default), so notes about the studbook can live next to the settings. A
//! plain YAML file is accepted as well. Every field is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Normalizer;
use crate::paths::CONFIG_PATH;
use crate::session::CheckOptions;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

impl Config {
    /// Load `.pedigree/config.md` from the working directory, or the defaults
    /// when there is none.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_PATH);
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!(path = CONFIG_PATH, "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load an explicit config file, or fall back to [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let yaml = match split_frontmatter(content) {
            (Some(frontmatter), _body) => frontmatter,
            (None, body) => body.to_string(),
        };

        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&yaml).context("Failed to parse config")?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.checks.validate()
    }

    /// Normalizer built from the input section.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::default()
            .with_unknown_values(&self.input.unknown_values)
            .with_date_formats(&self.input.date_formats)
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            top_n: self.checks.top_n,
            duplicate_parents: self.checks.duplicate_parents,
        }
    }

    /// Render as a Markdown config file.
    pub fn to_markdown(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config")?;
        Ok(format!("---\n{}---\n", yaml))
    }
}

/// Split `---` delimited YAML frontmatter from the rest of a document.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return (None, content);
    }

    let after_first = &content[3..];
    if let Some(end_pos) = after_first.find("\n---") {
        let frontmatter = after_first[..end_pos].trim();
        let body_start = 3 + end_pos + 4;
        let body = if body_start < content.len() {
            content[body_start..].trim_start_matches('\n')
        } else {
            ""
        };
        (Some(frontmatter.to_string()), body)
    } else {
        (None, content)
    }
}
