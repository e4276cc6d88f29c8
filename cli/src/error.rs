//! Error types for configlite.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=database, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configlite operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    OpenFailure,
    MigrationFailure,
    QueryFailure,

    // Not Found (exit 3)
    ConfigNotFound,
    NoRowsAffected,

    // Validation (exit 4)
    InvalidArgument,

    // Constraint (exit 5)
    ApplicationExists,

    // I/O (exit 8)
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::OpenFailure => "OPEN_FAILURE",
            Self::MigrationFailure => "MIGRATION_FAILURE",
            Self::QueryFailure => "QUERY_FAILURE",
            Self::ConfigNotFound => "CONFIG_NOT_FOUND",
            Self::NoRowsAffected => "NO_ROWS_AFFECTED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ApplicationExists => "APPLICATION_EXISTS",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::OpenFailure | Self::MigrationFailure | Self::QueryFailure => 2,
            Self::ConfigNotFound | Self::NoRowsAffected => 3,
            Self::InvalidArgument => 4,
            Self::ApplicationExists => 5,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether retrying with corrected input can succeed.
    ///
    /// True for validation errors and lookups that missed; false for
    /// database and I/O failures.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::ConfigNotFound | Self::NoRowsAffected
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in configlite operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open configuration database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("cannot run database schema migrations {}: {source}", path.display())]
    Migration {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("application already registered: {name}")]
    ApplicationExists { name: String },

    #[error("configuration value not found: ({application}, {configuration})")]
    ConfigNotFound {
        application: String,
        configuration: String,
    },

    #[error(
        "configuration value not found: ({application}, {configuration}) (did you mean: {}?)",
        similar.join(", ")
    )]
    ConfigNotFoundSimilar {
        application: String,
        configuration: String,
        similar: Vec<String>,
    },

    #[error("no configuration deleted: ({application}, {configuration})")]
    NoRowsAffected {
        application: String,
        configuration: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a SQLite error with the operation it interrupted.
    pub fn query(context: impl Into<String>) -> impl FnOnce(rusqlite::Error) -> Self {
        let context = context.into();
        move |source| Self::Query { context, source }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Open { .. } => ErrorCode::OpenFailure,
            Self::Migration { .. } => ErrorCode::MigrationFailure,
            Self::Query { .. } => ErrorCode::QueryFailure,
            Self::ApplicationExists { .. } => ErrorCode::ApplicationExists,
            Self::ConfigNotFound { .. } | Self::ConfigNotFoundSimilar { .. } => {
                ErrorCode::ConfigNotFound
            }
            Self::NoRowsAffected { .. } => ErrorCode::NoRowsAffected,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Open { path, .. } => Some(format!(
                "Check that {} is writable, or pick another file with `--db <path>`.",
                path.display()
            )),

            Self::ConfigNotFound { application, .. } => Some(format!(
                "Use `configlite list-configs {application}` to see stored keys."
            )),

            Self::ConfigNotFoundSimilar { similar, .. } => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }

            Self::NoRowsAffected { application, .. } => Some(format!(
                "Nothing matched. Use `configlite list-configs {application}` to see stored keys, \
                 or `--like` for a pattern such as 'prefix%'."
            )),

            Self::ApplicationExists { .. } => {
                Some("Drop `--strict` to make registration idempotent.".to_string())
            }

            Self::Migration { .. }
            | Self::Query { .. }
            | Self::InvalidArgument(_)
            | Self::Io(_)
            | Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
