//! Error types for optpage library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for optpage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for optpage library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse schema document: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported field type '{tag}' for field '{field}'")]
    UnsupportedFieldType { field: String, tag: String },

    #[error("Invalid schema for field '{field}': {reason}")]
    InvalidSchema { field: String, reason: String },

    // -------------------------------------------------------------------------
    // Page Errors
    // -------------------------------------------------------------------------
    #[error("Settings domain '{0}' not registered")]
    DomainNotFound(String),

    #[error("Field '{field}' not found in domain '{domain}'")]
    FieldNotFound { domain: String, field: String },

    #[error("Request does not name a settings page")]
    MissingPage,

    // -------------------------------------------------------------------------
    // Host Errors
    // -------------------------------------------------------------------------
    #[error("Option store error: {0}")]
    Store(String),

    #[error("Menu registration failed: {0}")]
    Menu(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DomainNotFound(_) | Error::FieldNotFound { .. } | Error::MissingPage
        )
    }

    /// Check if this error points at a mistake in a registered schema
    ///
    /// These are integration bugs in the registering plugin, not user-data problems.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFieldType { .. } | Error::InvalidSchema { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_names_tag() {
        let err = Error::UnsupportedFieldType {
            field: "option_key_9".into(),
            tag: "checkbox".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'checkbox'"));
        assert!(msg.contains("option_key_9"));
        assert!(err.is_config_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(Error::DomainNotFound("x".into()).is_not_found());
        assert!(Error::MissingPage.is_not_found());
        assert!(!Error::Menu("rejected".into()).is_not_found());
    }
}
