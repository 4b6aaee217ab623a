//! Normalized pedigree records and the table that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::normalize::{CellValue, Identifier, Normalizer, ParentRef};

/// Column role within a pedigree file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Id,
    Sire,
    Dam,
    BirthDate,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Id => write!(f, "id"),
            Role::Sire => write!(f, "sire"),
            Role::Dam => write!(f, "dam"),
            Role::BirthDate => write!(f, "birth date"),
        }
    }
}

/// Which parent a reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentRole {
    Sire,
    Dam,
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Sire => write!(f, "sire"),
            ParentRole::Dam => write!(f, "dam"),
        }
    }
}

/// Table rejected before any check runs.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("pedigree table has no records")]
    EmptyTable,

    #[error("{role} column '{column}' not found (available columns: {available})")]
    MissingColumn {
        role: Role,
        column: String,
        available: String,
    },
}

/// A column chosen by header name or by 0-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    fn resolve(&self, role: Role, headers: &[String]) -> Result<usize, TableError> {
        let found = match self {
            ColumnRef::Index(index) => (*index < headers.len()).then_some(*index),
            ColumnRef::Name(name) => headers.iter().position(|h| h.trim() == name.trim()),
        };
        found.ok_or_else(|| TableError::MissingColumn {
            role,
            column: self.to_string(),
            available: headers.join(", "),
        })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "#{}", index),
            ColumnRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ColumnRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Name(s.to_string()),
        })
    }
}

/// Which columns play which role. Defaults to the first four columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_id_column")]
    pub id: ColumnRef,
    #[serde(default = "default_sire_column")]
    pub sire: ColumnRef,
    #[serde(default = "default_dam_column")]
    pub dam: ColumnRef,
    /// `None` when the file carries no birth dates.
    #[serde(default = "default_birth_date_column")]
    pub birth_date: Option<ColumnRef>,
}

fn default_id_column() -> ColumnRef {
    ColumnRef::Index(0)
}

fn default_sire_column() -> ColumnRef {
    ColumnRef::Index(1)
}

fn default_dam_column() -> ColumnRef {
    ColumnRef::Index(2)
}

fn default_birth_date_column() -> Option<ColumnRef> {
    Some(ColumnRef::Index(3))
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: default_id_column(),
            sire: default_sire_column(),
            dam: default_dam_column(),
            birth_date: default_birth_date_column(),
        }
    }
}

/// Raw rows as produced by a reader, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// One individual.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based data row in the source file (header excluded).
    pub row: usize,
    pub id: Identifier,
    pub sire: ParentRef,
    pub dam: ParentRef,
    pub birth_date: Option<NaiveDate>,
    /// Original cell text, in header order.
    pub fields: Vec<String>,
}

impl Record {
    pub fn parent(&self, role: ParentRole) -> &ParentRef {
        match role {
            ParentRole::Sire => &self.sire,
            ParentRole::Dam => &self.dam,
        }
    }
}

/// Ordered, immutable collection of records. Never empty.
#[derive(Debug, Clone)]
pub struct PedigreeTable {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl PedigreeTable {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::EmptyTable);
        }
        Ok(Self { headers, records })
    }

    /// Normalize raw rows using the given column mapping.
    ///
    /// Column problems reject the whole table. Cell problems never do: a
    /// short row reads as empty cells and a bad date reads as unset.
    pub fn from_raw(
        raw: &RawTable,
        mapping: &ColumnMapping,
        normalizer: &Normalizer,
    ) -> Result<Self, TableError> {
        let id_col = mapping.id.resolve(Role::Id, &raw.headers)?;
        let sire_col = mapping.sire.resolve(Role::Sire, &raw.headers)?;
        let dam_col = mapping.dam.resolve(Role::Dam, &raw.headers)?;
        let birth_col = mapping
            .birth_date
            .as_ref()
            .map(|column| column.resolve(Role::BirthDate, &raw.headers))
            .transpose()?;

        let mut unparsed_dates = 0usize;
        let records: Vec<Record> = raw
            .rows
            .iter()
            .enumerate()
            .map(|(index, cells)| {
                let cell = |col: usize| cells.get(col).unwrap_or(&CellValue::Empty);
                let birth_date = birth_col.and_then(|col| {
                    let date = normalizer.birth_date(cell(col));
                    if date.is_none() && cell(col) != &CellValue::Empty {
                        unparsed_dates += 1;
                        tracing::debug!(row = index + 1, value = %cell(col).raw_text(), "unparsable birth date");
                    }
                    date
                });
                Record {
                    row: index + 1,
                    id: normalizer.identifier(cell(id_col)),
                    sire: normalizer.parent_ref(cell(sire_col)),
                    dam: normalizer.parent_ref(cell(dam_col)),
                    birth_date,
                    fields: (0..raw.headers.len()).map(|col| cell(col).raw_text()).collect(),
                }
            })
            .collect();

        if unparsed_dates > 0 {
            tracing::info!(count = unparsed_dates, "birth dates left unset");
        }

        Self::new(raw.headers.clone(), records)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed table; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a PedigreeTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_from_raw_default_mapping() {
        let raw = raw(
            &["ID", "Vader", "Moeder", "Geboortedatum"],
            &[
                &["141209548", "0", "0", "1-1-1970"],
                &["15", "141209548", "141209555", "1-1-1941"],
            ],
        );
        let table =
            PedigreeTable::from_raw(&raw, &ColumnMapping::default(), &Normalizer::default())
                .unwrap();

        assert_eq!(table.len(), 2);
        let child = &table.records()[1];
        assert_eq!(child.row, 2);
        assert_eq!(child.id.as_str(), "15");
        assert_eq!(child.sire, ParentRef::Known(Identifier::from("141209548")));
        assert_eq!(child.birth_date, NaiveDate::from_ymd_opt(1941, 1, 1));
        assert_eq!(table.records()[0].sire, ParentRef::Unknown);
    }

    #[test]
    fn test_from_raw_named_columns() {
        let raw = raw(
            &["dob", "animal", "father", "mother"],
            &[&["2001-05-04", "A", "B", "C"]],
        );
        let mapping = ColumnMapping {
            id: ColumnRef::Name("animal".to_string()),
            sire: ColumnRef::Name("father".to_string()),
            dam: ColumnRef::Name("mother".to_string()),
            birth_date: Some(ColumnRef::Name("dob".to_string())),
        };
        let table = PedigreeTable::from_raw(&raw, &mapping, &Normalizer::default()).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.id.as_str(), "A");
        assert_eq!(record.dam.known().map(|d| d.as_str()), Some("C"));
        assert_eq!(record.birth_date, NaiveDate::from_ymd_opt(2001, 5, 4));
    }

    #[test]
    fn test_missing_column_rejects_table() {
        let raw = raw(&["ID", "Vader", "Moeder"], &[&["1", "0", "0"]]);
        let err = PedigreeTable::from_raw(&raw, &ColumnMapping::default(), &Normalizer::default())
            .unwrap_err();
        match err {
            TableError::MissingColumn { role, .. } => assert_eq!(role, Role::BirthDate),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_without_birth_date_column() {
        let raw = raw(&["ID", "Vader", "Moeder"], &[&["1", "0", "0"]]);
        let mapping = ColumnMapping {
            birth_date: None,
            ..Default::default()
        };
        let table = PedigreeTable::from_raw(&raw, &mapping, &Normalizer::default()).unwrap();
        assert_eq!(table.records()[0].birth_date, None);
    }

    #[test]
    fn test_empty_table_rejected() {
        let raw = raw(&["ID", "Vader", "Moeder", "Geboortedatum"], &[]);
        let err = PedigreeTable::from_raw(&raw, &ColumnMapping::default(), &Normalizer::default())
            .unwrap_err();
        assert!(matches!(err, TableError::EmptyTable));
    }

    #[test]
    fn test_short_rows_and_bad_dates_degrade() {
        let raw = raw(
            &["ID", "Vader", "Moeder", "Geboortedatum"],
            &[&["1", "2"], &["3", "0", "0", "not a date"]],
        );
        let table =
            PedigreeTable::from_raw(&raw, &ColumnMapping::default(), &Normalizer::default())
                .unwrap();
        assert_eq!(table.records()[0].dam, ParentRef::Unknown);
        assert_eq!(table.records()[0].birth_date, None);
        assert_eq!(table.records()[0].fields, vec!["1", "2", "", ""]);
        assert_eq!(table.records()[1].birth_date, None);
    }

    #[test]
    fn test_column_ref_from_str() {
        assert_eq!("2".parse::<ColumnRef>().unwrap(), ColumnRef::Index(2));
        assert_eq!(
            "Vader".parse::<ColumnRef>().unwrap(),
            ColumnRef::Name("Vader".to_string())
        );
    }
}
