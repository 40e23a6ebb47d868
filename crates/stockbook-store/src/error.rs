//! # Storage Error Types
//!
//! Error types for file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  calamine / rust_xlsxwriter / csv / io errors                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds file path and sheet context           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in console app) ← Serialized for the operator               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use stockbook_core::CoreError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure on a specific file.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - Disk full or permission denied during save
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ledger workbook could not be parsed.
    #[error("Failed to read workbook: {0}")]
    WorkbookRead(String),

    /// The ledger workbook could not be serialized.
    #[error("Failed to write workbook: {0}")]
    WorkbookWrite(String),

    /// A required sheet is absent from an existing workbook.
    #[error("Sheet '{0}' is missing from the workbook")]
    SheetMissing(String),

    /// The header row does not match the expected column schema.
    #[error("Unexpected columns in sheet '{sheet}': expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        sheet: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A cell holds a value that cannot be converted to its column type.
    ///
    /// `row` is 1-based, counting the header row.
    #[error("Invalid value in sheet '{sheet}', row {row}, column '{column}': {reason}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        reason: String,
    },

    /// Credential file or CSV export failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A ledger rule rejected the mutation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<calamine::XlsxError> for StoreError {
    fn from(err: calamine::XlsxError) -> Self {
        StoreError::WorkbookRead(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for StoreError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        StoreError::WorkbookWrite(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
