use crate::error::Result;
use crate::models::MetadataTable;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the table to `path`, creating the parent directory if needed
    pub fn write_table(&self, table: &MetadataTable, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = BufWriter::new(File::create(path)?);
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(file);

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }

        let mut file = writer.into_inner().map_err(|e| e.into_error())?;
        file.flush()?;

        debug!(
            path = %path.display(),
            rows = table.len(),
            "Wrote table"
        );

        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
