//! Core error types for lunchline-core.
//!
//! The clock, the rule evaluator and the message composer are total functions
//! and never return these. Errors only come from the edges: loading the menu,
//! reading configuration, validating operator input and handing a message to
//! the transport.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lunchline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The menu file could not be found at startup.
    #[error("Menu catalog not found at {path}")]
    MissingCatalog { path: PathBuf },

    /// Menu-related errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Outbound message errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Menu file errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The menu file is not valid TOML or does not match the menu layout.
    #[error("Failed to parse menu at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Two entries share an id.
    #[error("Duplicate menu id: {0}")]
    DuplicateId(String),

    /// An entry has an empty id.
    #[error("Menu entry with empty id")]
    EmptyId,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Item id is not on the menu
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// Extra id is not on the menu
    #[error("Unknown extra: {0}")]
    UnknownExtra(String),

    /// Band or dispatch table is malformed
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Contact number cannot be used in a chat link
    #[error("Invalid contact number '{0}': only digits, '+', spaces and dashes are allowed")]
    InvalidContact(String),

    /// Value out of range, e.g. an item quantity that no longer fits
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised while handing a message to the outbound channel.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The chat link could not be opened
    #[error("Failed to open chat link: {0}")]
    OpenFailed(#[source] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_names_the_path() {
        let err = CoreError::MissingCatalog {
            path: PathBuf::from("/srv/menu.toml"),
        };
        assert_eq!(err.to_string(), "Menu catalog not found at /srv/menu.toml");
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::UnknownItem("Z".into()).into();
        assert!(
            matches!(err, CoreError::Validation(ValidationError::UnknownItem(ref id)) if id == "Z")
        );
        assert_eq!(err.to_string(), "Validation error: Unknown menu item: Z");
    }

    #[test]
    fn config_load_failure_names_the_path() {
        let err: CoreError = ConfigError::LoadFailed {
            path: PathBuf::from("/etc/lunchline/config.toml"),
            message: "stream did not contain valid UTF-8".into(),
        }
        .into();
        assert!(err.to_string().contains("/etc/lunchline/config.toml"));
    }
}
