//! Unified application error type.
//! Store, controller, widget and cli code all return AppError so failures
//! reach the caller typed, and the caller decides how severe they are.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// A write to the session store failed (check-in or check-out).
    #[error("Failed to persist {op}: {source}")]
    Persistence {
        op: &'static str,
        #[source]
        source: Box<AppError>,
    },

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("Already checked in since {0}")]
    AlreadyCheckedIn(String),

    #[error("No open session to check out of")]
    NoOpenSession,

    // ---------------------------
    // Snapshot / parsing
    // ---------------------------
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Unreadable widget snapshot: {0}")]
    Snapshot(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap a store error as a persistence failure of the named operation.
    pub fn persistence(op: &'static str, source: AppError) -> Self {
        AppError::Persistence {
            op,
            source: Box::new(source),
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, AppError::Persistence { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
