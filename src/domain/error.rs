//! Error types for ProStock.
//!
//! Storage failures and export failures are kept apart so the caller can
//! tell a broken database from an unwritable destination file.

use std::path::PathBuf;
use thiserror::Error;

use super::RecordId;

/// Failures of the local SQLite store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare database location {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored record {id} is malformed: {reason}")]
    Corrupt { id: RecordId, reason: String },

    #[error("Database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i32, supported: i32 },

    #[error("Database connection lock poisoned")]
    LockPoisoned,

    #[error("Database is still referenced by {0} other handle(s)")]
    InUse(usize),

    #[error("Failed to close database: {0}")]
    Close(#[source] rusqlite::Error),
}

/// Failures while writing or reading a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to open export destination {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export: {0}")]
    Write(#[from] csv::Error),

    #[error("Failed to flush export: {0}")]
    Flush(#[source] std::io::Error),

    #[error("Failed to read export: {0}")]
    Read(#[source] csv::Error),

    #[error("Malformed export data: {0}")]
    Malformed(String),

    #[error("Failed to read records for export: {0}")]
    Query(#[from] PersistenceError),
}

/// Rejections of user-entered movement data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Product name cannot be empty")]
    EmptyProduct,

    #[error("Invalid unit '{0}', expected one of: unit, kilogram, liter, pack, box")]
    InvalidUnit(String),

    #[error("Invalid {field} quantity '{value}', expected a whole number between 0 and {max}")]
    InvalidQuantity {
        field: &'static str,
        value: String,
        max: u32,
    },

    #[error("Invalid {field} date '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}
