//! Canonical forms for identifiers, parent references and birth dates.
//!
//! Every raw cell goes through this module exactly once, when the table is
//! built. Checks never look at raw text again.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// Parent values that mean "not recorded".
pub const UNKNOWN_SENTINELS: [&str; 4] = ["0", "", "nan", "None"];

/// Date formats tried, in order, when no explicit list is configured.
/// Two-digit years come before their four-digit forms; chrono maps `70`..`99`
/// to the 1900s and `00`..`69` to the 2000s.
pub const DEFAULT_DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%d-%m-%y", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%y", "%d.%m.%Y", "%Y/%m/%d",
    "%Y%m%d",
];

/// `%Y` happily reads `70` as the year 70; no studbook goes back that far.
const MIN_PLAUSIBLE_YEAR: i32 = 100;

/// Text such as `141209548.0`, which spreadsheets emit for integer columns
/// that contain a blank somewhere.
fn integral_float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(-?\d+)\.0+$").unwrap())
}

/// A raw cell as delivered by a reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Empty,
}

impl CellValue {
    /// Canonical string form shared by identifiers and parent references.
    ///
    /// Numbers go through the same representation whatever type they arrived
    /// as, so `141209548`, `141209548.0` and `"141209548.0"` all compare equal.
    pub fn canonical_text(&self) -> String {
        match self {
            CellValue::Text(text) => {
                let trimmed = text.trim();
                match integral_float_pattern().captures(trimmed) {
                    Some(caps) => caps[1].to_string(),
                    None => trimmed.to_string(),
                }
            }
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => {
                if value.is_nan() {
                    "nan".to_string()
                } else if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            CellValue::Empty => String::new(),
        }
    }

    /// Original text of the cell, for display and export.
    pub fn raw_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Float(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }
}

/// An individual's identifier after normalization. Comparison is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_cell(cell: &CellValue) -> Self {
        Self(cell.canonical_text())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reference from a record to one of its parents. Serializes as the
/// identifier, or `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParentRef {
    Known(Identifier),
    Unknown,
}

impl ParentRef {
    pub fn known(&self) -> Option<&Identifier> {
        match self {
            ParentRef::Known(id) => Some(id),
            ParentRef::Unknown => None,
        }
    }
}

/// Turns raw cells into identifiers, parent references and dates.
#[derive(Debug, Clone)]
pub struct Normalizer {
    extra_unknown: Vec<String>,
    date_formats: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            extra_unknown: Vec::new(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Normalizer {
    /// Add spellings that also mean "parent not recorded". The built-in
    /// sentinels always apply.
    pub fn with_unknown_values(mut self, values: &[String]) -> Self {
        self.extra_unknown = values.iter().map(|v| v.trim().to_string()).collect();
        self
    }

    /// Replace the list of accepted birth-date formats (chrono strftime syntax).
    pub fn with_date_formats(mut self, formats: &[String]) -> Self {
        if !formats.is_empty() {
            self.date_formats = formats.to_vec();
        }
        self
    }

    pub fn is_unknown(&self, canonical: &str) -> bool {
        UNKNOWN_SENTINELS.contains(&canonical) || self.extra_unknown.iter().any(|v| v == canonical)
    }

    pub fn identifier(&self, cell: &CellValue) -> Identifier {
        Identifier::from_cell(cell)
    }

    pub fn parent_ref(&self, cell: &CellValue) -> ParentRef {
        let canonical = cell.canonical_text();
        if self.is_unknown(&canonical) {
            ParentRef::Unknown
        } else {
            ParentRef::Known(Identifier(canonical))
        }
    }

    /// Parse a birth date. Anything that does not match a configured format
    /// is `None`; this never fails.
    pub fn birth_date(&self, cell: &CellValue) -> Option<NaiveDate> {
        let text = match cell {
            CellValue::Empty => return None,
            CellValue::Float(value) if value.is_nan() => return None,
            other => other.canonical_text(),
        };
        if text.is_empty() {
            return None;
        }

        let plausible = |date: &NaiveDate| date.year() >= MIN_PLAUSIBLE_YEAR;

        for format in &self.date_formats {
            if let Some(date) = NaiveDate::parse_from_str(&text, format)
                .ok()
                .filter(plausible)
            {
                return Some(date);
            }
        }

        // Timestamps exported by spreadsheets carry a time part.
        for format in &self.date_formats {
            for suffix in [" %H:%M:%S", "T%H:%M:%S", " %H:%M"] {
                let with_time = format!("{}{}", format, suffix);
                if let Some(date) = NaiveDateTime::parse_from_str(&text, &with_time)
                    .ok()
                    .map(|stamp| stamp.date())
                    .filter(plausible)
                {
                    return Some(date);
                }
            }
        }

        None
    }
}
