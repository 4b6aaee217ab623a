//! Reading pedigree files into raw tables.
//!
//! Two inputs are supported: delimited text with a header row, and a JSON
//! array of objects. Delimited files are decoded as UTF-8 and fall back to
//! Latin-1 when that fails, which covers the spreadsheet exports this tool is
//! usually fed.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{CellValue, RawTable};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file has no header row")]
    NoHeader,

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON input must be an array of objects ({0})")]
    JsonShape(String),
}

/// Field separator for delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    #[serde(alias = ",")]
    Comma,
    #[serde(alias = ";")]
    Semicolon,
    #[serde(alias = "\t")]
    Tab,
    #[serde(alias = "|")]
    Pipe,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Semicolon => ';',
            Separator::Tab => '\t',
            Separator::Pipe => '|',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Comma => write!(f, "comma"),
            Separator::Semicolon => write!(f, "semicolon"),
            Separator::Tab => write!(f, "tab"),
            Separator::Pipe => write!(f, "pipe"),
        }
    }
}

impl FromStr for Separator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" => Ok(Separator::Comma),
            ";" | "semicolon" => Ok(Separator::Semicolon),
            "\t" | "\\t" | "tab" => Ok(Separator::Tab),
            "|" | "pipe" => Ok(Separator::Pipe),
            other => anyhow::bail!(
                "Invalid separator '{}'. Use comma, semicolon, tab or pipe.",
                other
            ),
        }
    }
}

/// Read a file, choosing the JSON reader for `.json` files.
pub fn read_path(path: &Path, separator: Separator) -> Result<RawTable, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let table = if is_json {
        parse_json(&text)?
    } else {
        parse_delimited(&text, separator)?
    };
    tracing::info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read pedigree file"
    );
    Ok(table)
}

/// Decode bytes as UTF-8, or as Latin-1 when they are not valid UTF-8.
/// A leading byte-order mark is dropped.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::debug!("input is not UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

/// Parse delimited text with a header row. Quoted fields may contain the
/// separator, doubled quotes and line breaks. Blank lines are skipped.
pub fn parse_delimited(text: &str, separator: Separator) -> Result<RawTable, ReadError> {
    let mut records = split_records(text, separator.as_char())?.into_iter();

    let headers: Vec<String> = records
        .next()
        .map(|fields| fields.into_iter().map(|h| h.trim().to_string()).collect())
        .ok_or(ReadError::NoHeader)?;

    let rows = records
        .map(|fields| {
            fields
                .iter()
                .map(|field| CellValue::from(field.as_str()))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn split_records(text: &str, separator: char) -> Result<Vec<Vec<String>>, ReadError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields));
            }
            c if c == separator => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ReadError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, fields);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(fields);
    }
}

/// Parse a JSON array of objects. Columns are the union of object keys in
/// first-seen order; numbers keep their type so numeric identifiers normalize
/// the same way as text ones.
pub fn parse_json(text: &str) -> Result<RawTable, ReadError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let items = value
        .as_array()
        .ok_or_else(|| ReadError::JsonShape("top-level value is not an array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or_else(|| ReadError::JsonShape(format!("element {} is not an object", i)))?;
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|object| {
            headers
                .iter()
                .map(|header| object.get(header).map(cell_from_json).unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn cell_from_json(value: &serde_json::Value) -> CellValue {
    use serde_json::Value;
    match value {
        Value::Null => CellValue::Empty,
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Empty),
        },
        Value::String(s) => CellValue::from(s.as_str()),
        other => CellValue::Text(other.to_string()),
    }
}
