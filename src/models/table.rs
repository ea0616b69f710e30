use crate::error::{ProcessingError, Result};
use crate::utils::constants::NULL_MARKERS;
use std::path::{Path, PathBuf};

/// Returns true when a cell holds no value
pub fn is_missing(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell.trim())
}

/// An in-memory CSV table. Cells are kept as read so that columns this
/// crate does not touch are written back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataTable {
    source: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MetadataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: PathBuf::new(),
            headers,
            rows,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// File the table was read from, empty for tables built in memory
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ProcessingError::MissingColumn {
                column: name.to_string(),
                file: self.source.clone(),
            })
    }

    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows[row]
            .get(column)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: String) {
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value;
    }

    /// Index of `name`, appending an empty column when absent
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }

        self.headers.push(name.to_string());
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        width - 1
    }

    /// Row indices whose cell in `column` is missing
    pub fn missing_rows(&self, column: usize) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&row| is_missing(self.value(row, column)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> MetadataTable {
        MetadataTable::new(
            vec!["site_id".to_string(), "elevation".to_string()],
            vec![
                vec!["a".to_string(), "12.5".to_string()],
                vec!["b".to_string(), "".to_string()],
                vec!["c".to_string(), "NaN".to_string()],
            ],
        )
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NA"));
        assert!(is_missing("nan"));
        assert!(is_missing("null"));
        assert!(!is_missing("0"));
        assert!(!is_missing("-12.3"));
        assert!(!is_missing("NAN?"));
    }

    #[test]
    fn test_missing_rows() {
        let table = sample_table();
        assert_eq!(table.missing_rows(1), vec![1, 2]);
    }

    #[test]
    fn test_ensure_column_appends_once() {
        let mut table = sample_table();
        let index = table.ensure_column("depth");
        assert_eq!(index, 2);
        assert_eq!(table.ensure_column("depth"), 2);
        assert_eq!(table.headers().len(), 3);
        assert!(table.rows().iter().all(|row| row.len() == 3));
        assert_eq!(table.value(0, index), "");
    }

    #[test]
    fn test_require_column_reports_source() {
        let table = sample_table().with_source("lakes.csv");
        assert_eq!(table.require_column("elevation").unwrap(), 1);

        match table.require_column("centroid_lat") {
            Err(ProcessingError::MissingColumn { column, file }) => {
                assert_eq!(column, "centroid_lat");
                assert_eq!(file, PathBuf::from("lakes.csv"));
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
