//! Error types shared by the analysis pipeline and its file collaborators.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Malformed record at row {row}: field {field} has invalid value {value:?}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Group {group}: {field} total exceeds the supported range")]
    TotalOverflow { group: i64, field: &'static str },

    #[error("No course name ({0}) found!")]
    CourseNotFound(String),

    #[error("File not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("No readable CSV files found in the ZIP archive: {path}")]
    EmptyArchive { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
