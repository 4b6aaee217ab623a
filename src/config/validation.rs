//! Validation logic for configuration.

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};

use super::defaults::{ChecksConfig, InputConfig};

impl InputConfig {
    /// Validate input configuration
    pub fn validate(&self) -> Result<()> {
        if self.date_formats.is_empty() {
            anyhow::bail!("input.date_formats must list at least one format");
        }

        for format in &self.date_formats {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                anyhow::bail!("input.date_formats contains an invalid format '{}'", format);
            }
        }

        Ok(())
    }
}

impl ChecksConfig {
    /// Validate checks configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            anyhow::bail!("checks.top_n must be greater than 0");
        }

        if self.offspring_warn_threshold == Some(0) {
            anyhow::bail!("checks.offspring_warn_threshold must be greater than 0 when set");
        }

        Ok(())
    }
}
