use std::collections::BTreeMap;

use crate::cell::{cell_at, CellValue};

/// Field name -> zero-based column index, built once per batch from row 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: BTreeMap<String, usize>,
}

impl HeaderMap {
    /// Recognize every non-blank header. Names are trimmed; a repeated name
    /// keeps the last column it appears in.
    pub fn resolve(header_row: &[CellValue]) -> Self {
        Self::build(header_row, |_| true)
    }

    /// Recognize only headers in `fields`. Anything else is ignored.
    pub fn resolve_fields<S: AsRef<str>>(header_row: &[CellValue], fields: &[S]) -> Self {
        Self::build(header_row, |name| fields.iter().any(|f| f.as_ref() == name))
    }

    fn build(header_row: &[CellValue], recognized: impl Fn(&str) -> bool) -> Self {
        let mut columns = BTreeMap::new();
        for (idx, cell) in header_row.iter().enumerate() {
            let text = cell.as_text();
            let name = text.trim();
            if name.is_empty() || !recognized(name) {
                continue;
            }
            columns.insert(name.to_string(), idx);
        }
        Self { columns }
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.columns.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Field -> coerced (trimmed) cell value for one data row.
    pub fn record(&self, row: &[CellValue]) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|(field, &idx)| (field.clone(), cell_at(row, idx).as_text().trim().to_string()))
            .collect()
    }
}
