//! Error types for formcraft.
//!
//! This module defines all error types used throughout the formcraft crate.
//! Per-field validation failures are not errors in this sense: they are plain
//! messages collected by the submission flow (see [`crate::validate`]).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for formcraft operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Document Errors ===
    /// A form was saved without a title.
    #[error("Please enter a form title")]
    TitleRequired,

    /// No form with the given id exists in the library.
    #[error("form not found: {id}")]
    FormNotFound {
        /// The requested form id.
        id: String,
    },

    /// No field with the given id exists in the form.
    #[error("field not found: {id}")]
    FieldNotFound {
        /// The requested field id.
        id: String,
    },

    /// No response with the given id exists in the store.
    #[error("response not found: {id}")]
    ResponseNotFound {
        /// The requested response id.
        id: String,
    },

    /// A builder edit was rejected.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored collection no longer parses. Writes to it are refused so
    /// the stored value survives for repair.
    #[error("stored collection '{key}' is unreadable: {source}")]
    CorruptCollection {
        /// Storage key of the collection.
        key: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for formcraft operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid edit error.
    #[must_use]
    pub fn invalid_edit(message: impl Into<String>) -> Self {
        Self::InvalidEdit(message.into())
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a form-not-found error.
    #[must_use]
    pub fn form_not_found(id: impl Into<String>) -> Self {
        Self::FormNotFound { id: id.into() }
    }

    /// Create a field-not-found error.
    #[must_use]
    pub fn field_not_found(id: impl Into<String>) -> Self {
        Self::FieldNotFound { id: id.into() }
    }

    /// Create a response-not-found error.
    #[must_use]
    pub fn response_not_found(id: impl Into<String>) -> Self {
        Self::ResponseNotFound { id: id.into() }
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FormNotFound { .. } | Self::FieldNotFound { .. } | Self::ResponseNotFound { .. }
        )
    }
}
