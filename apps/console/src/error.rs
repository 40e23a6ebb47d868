//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockbook                              │
//! │                                                                         │
//! │  stockbook movements record --type sortie --product Riz --quantity 20  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::Io { .. } ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Ledger Rule? ─── CoreError::InsufficientStock ── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: {"code":"INSUFFICIENT_STOCK",                                 │
//! │           "message":"Insufficient stock for Riz: only 7 left, ..."}    │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockbook_core::CoreError;
use stockbook_store::StoreError;

use crate::state::ConfigError;

/// Error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "ACCESS_DENIED",
///   "message": "Only an administrator may purge the ledger"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or category does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Outbound movement larger than the stock on hand
    InsufficientStock,

    /// Workbook, credential file or export failure
    StorageError,

    /// Unknown user or wrong password
    AuthenticationFailed,

    /// Role does not allow the action
    AccessDenied,

    /// Configuration file unreadable or invalid
    ConfigError,

    /// Unexpected failure
    Internal,
}

/// Result type for command handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the single, generic login failure.
    pub fn authentication_failed() -> Self {
        ApiError::new(ErrorCode::AuthenticationFailed, "Invalid username or password")
    }

    /// Creates an access denied error for an admin-only action.
    pub fn access_denied(action: &str) -> Self {
        ApiError::new(
            ErrorCode::AccessDenied,
            format!("Only an administrator may {}", action),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
///
/// File-level details are logged; the operator gets a short message.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core.into(),
            StoreError::Io { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "File operation failed");
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Could not access {}", path.display()),
                )
            }
            StoreError::WorkbookRead(e) => {
                tracing::error!("Workbook read failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "The ledger workbook could not be read")
            }
            StoreError::WorkbookWrite(e) => {
                tracing::error!("Workbook write failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "The ledger workbook could not be written")
            }
            StoreError::Csv(e) => {
                tracing::error!("CSV operation failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "A CSV file could not be processed")
            }
            // Shown verbatim: they name the sheet, row and column.
            err @ (StoreError::SheetMissing(_)
            | StoreError::HeaderMismatch { .. }
            | StoreError::InvalidCell { .. }) => ApiError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(name) => ApiError::not_found("Product", &name),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
