//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::checks::{CheckKind, DuplicateParentPolicy, DEFAULT_TOP_N};
use crate::domain::normalize::DEFAULT_DATE_FORMATS;
use crate::domain::ColumnMapping;
use crate::reader::Separator;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_top_n, usize, DEFAULT_TOP_N);
default_fn!(
    default_date_formats,
    Vec<String>,
    DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
);
default_fn!(default_enabled_checks, Vec<CheckKind>, CheckKind::ALL.to_vec());

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// How input files are read and normalized
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputConfig {
    /// Field separator for delimited files (default: comma)
    #[serde(default)]
    pub separator: Separator,
    /// Which columns hold the identifier, sire, dam and birth date
    #[serde(default)]
    pub columns: ColumnMapping,
    /// Accepted birth-date formats, tried in order (chrono strftime syntax)
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    /// Extra values meaning "parent not recorded", on top of 0, nan and None
    #[serde(default)]
    pub unknown_values: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            columns: ColumnMapping::default(),
            date_formats: default_date_formats(),
            unknown_values: Vec::new(),
        }
    }
}

/// Which checks run and how
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChecksConfig {
    /// Checks run when none are named on the command line (default: all)
    #[serde(default = "default_enabled_checks")]
    pub enabled: Vec<CheckKind>,
    /// Length of the top-sires and top-dams lists (default: 20)
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Resolution of parents registered more than once (default: last-wins)
    #[serde(default)]
    pub duplicate_parents: DuplicateParentPolicy,
    /// Warn about parents with more offspring than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offspring_warn_threshold: Option<usize>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_checks(),
            top_n: default_top_n(),
            duplicate_parents: DuplicateParentPolicy::default(),
            offspring_warn_threshold: None,
        }
    }
}
