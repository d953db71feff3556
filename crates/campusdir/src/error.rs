//! Error types for campusdir.
//!
//! This module defines all error types used throughout the campusdir crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::EntryId;

/// The main error type for campusdir operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Directory Errors ===
    /// No catalog entry carries the requested identifier.
    #[error("no entry with id {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: EntryId,
    },

    /// A club category that the catalog does not define.
    #[error("unknown club category '{id}'")]
    UnknownCategory {
        /// The category identifier.
        id: String,
    },

    // === Catalog Errors ===
    /// A seed record failed validation at load time.
    #[error("invalid catalog entry {id} ('{name}'): {reason}")]
    InvalidCatalogEntry {
        /// Identifier of the offending record.
        id: EntryId,
        /// Display name of the offending record (may be empty).
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two catalog records share an identifier.
    #[error("duplicate catalog id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: EntryId,
    },

    /// Two club categories share an identifier.
    #[error("duplicate club category '{id}'")]
    DuplicateCategory {
        /// The repeated category identifier.
        id: String,
    },

    /// Failed to read a catalog file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for campusdir operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: EntryId) -> Self {
        Self::NotFound { id }
    }

    /// Create an invalid catalog entry error.
    #[must_use]
    pub fn invalid_entry(id: EntryId, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCatalogEntry {
            id,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown category error.
    #[must_use]
    pub fn unknown_category(id: impl Into<String>) -> Self {
        Self::UnknownCategory { id: id.into() }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a failed lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
