use std::path::PathBuf;
use thiserror::Error;

use crate::models::ExtractionStatus;

/// Reasons a single year yields no data. None of them stop the run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("No matching row in sheet {sheet}: {msg}")]
    PatternNotFound { sheet: String, msg: String },

    #[error("Values in sheet {sheet}, row {row} look like business data, not tourism (avg: {average:.1})")]
    ImplausibleData {
        sheet: String,
        row: usize,
        average: f64,
    },

    #[error("{0}")]
    Read(String),
}

impl ExtractError {
    /// Log status recorded for a year that failed with this error
    pub fn status(&self) -> ExtractionStatus {
        match self {
            ExtractError::FileNotFound(_) => ExtractionStatus::FileNotFound,
            ExtractError::SheetNotFound(_)
            | ExtractError::PatternNotFound { .. }
            | ExtractError::ImplausibleData { .. } => ExtractionStatus::NoDataFound,
            ExtractError::Read(msg) => ExtractionStatus::Error(msg.clone()),
        }
    }
}
