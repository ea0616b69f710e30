use crate::error::Result;
use crate::models::MetadataTable;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct TableReader {
    delimiter: u8,
}

impl TableReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a whole CSV file with a header row into memory
    pub fn read_table(&self, path: &Path) -> Result<MetadataTable> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(MetadataTable::new(headers, rows).with_source(path))
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}
