use pedigree::domain::{CellValue, ColumnMapping, Normalizer, PedigreeTable, RawTable};

/// Builds a pedigree table from text cells, as a reader would produce them.
///
/// Columns are `id,sire,dam,birth_date`; an empty string is an empty cell.
pub struct TableBuilder {
    rows: Vec<Vec<CellValue>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn row(mut self, id: &str, sire: &str, dam: &str, birth_date: &str) -> Self {
        self.rows.push(
            [id, sire, dam, birth_date]
                .into_iter()
                .map(CellValue::from)
                .collect(),
        );
        self
    }

    /// A row with numeric cells, the way spreadsheet exports often store ids.
    pub fn numeric_row(mut self, id: f64, sire: f64, dam: f64) -> Self {
        self.rows.push(vec![
            CellValue::Float(id),
            CellValue::Float(sire),
            CellValue::Float(dam),
            CellValue::Empty,
        ]);
        self
    }

    pub fn raw(self) -> RawTable {
        RawTable {
            headers: vec![
                "id".to_string(),
                "sire".to_string(),
                "dam".to_string(),
                "birth_date".to_string(),
            ],
            rows: self.rows,
        }
    }

    pub fn build(self) -> PedigreeTable {
        PedigreeTable::from_raw(&self.raw(), &ColumnMapping::default(), &Normalizer::default())
            .expect("Failed to build table")
    }
}
