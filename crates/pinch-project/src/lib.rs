//! pinch-project: stream table file formats and validation.

pub mod csv;
pub mod schema;
pub mod validate;

pub use csv::{parse_csv, to_csv_string};
pub use schema::*;
pub use validate::{ValidationError, validate_table};

use pinch_core::PinchError;
use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Format error on line {line}: {what}")]
    Format { line: usize, what: String },

    #[error("Unsupported file type: {path}")]
    UnsupportedFormat { path: String },

    #[error(transparent)]
    Pinch(#[from] PinchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encodings of a stream table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Yaml,
    Json,
}

impl TableFormat {
    /// Pick the encoding from the file extension.
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Load and validate a stream table, choosing the parser by extension.
pub fn load(path: &Path) -> ProjectResult<StreamTable> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => load_csv(path),
        TableFormat::Yaml => load_yaml(path),
        TableFormat::Json => load_json(path),
    }
}

pub fn load_csv(path: &Path) -> ProjectResult<StreamTable> {
    let content = std::fs::read_to_string(path)?;
    let table = parse_csv(&content)?;
    validate_table(&table)?;
    Ok(table)
}

pub fn save_csv(path: &Path, table: &StreamTable) -> ProjectResult<()> {
    validate_table(table)?;
    std::fs::write(path, to_csv_string(table))?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<StreamTable> {
    let content = std::fs::read_to_string(path)?;
    let table: StreamTable = serde_yaml::from_str(&content)?;
    validate_table(&table)?;
    Ok(table)
}

pub fn save_yaml(path: &Path, table: &StreamTable) -> ProjectResult<()> {
    validate_table(table)?;
    let content = serde_yaml::to_string(table)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<StreamTable> {
    let content = std::fs::read_to_string(path)?;
    let table: StreamTable = serde_json::from_str(&content)?;
    validate_table(&table)?;
    Ok(table)
}

pub fn save_json(path: &Path, table: &StreamTable) -> ProjectResult<()> {
    validate_table(table)?;
    let content = serde_json::to_string_pretty(table)?;
    std::fs::write(path, content)?;
    Ok(())
}
