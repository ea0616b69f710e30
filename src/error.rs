use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "Archive {} is not located under the expected source root {}",
        archive.display(),
        source_root.display()
    )]
    PathScope {
        archive: PathBuf,
        source_root: PathBuf,
    },

    #[error("Column '{column}' not found in {}", file.display())]
    MissingColumn { column: String, file: PathBuf },

    #[error("Column '{column}' already exists in {}", file.display())]
    ColumnConflict { column: String, file: PathBuf },

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Unexpected elevation service response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
