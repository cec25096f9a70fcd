//! Custom error types for banker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// A plotting backend's library was not linked into this build
///
/// Carries the friendly library name and the package (cargo feature) that
/// provides it, so callers can skip the backend or tell the user what to
/// enable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Plot library '{library}' is unavailable (rebuild with the '{package}' feature)")]
pub struct PlotLibraryUnavailable {
    /// Human-readable library name
    pub library: &'static str,
    /// Crate (and cargo feature) that provides it
    pub package: &'static str,
}

/// The main error type for banker operations
#[derive(Error, Debug)]
pub enum BankerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A plotting backend cannot be used in this build
    #[error(transparent)]
    PlotUnavailable(#[from] PlotLibraryUnavailable),

    /// The underlying plotting library failed to draw
    #[error("Render error: {0}")]
    Render(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl BankerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The missing plot library, if this error reports one
    pub fn plot_unavailable(&self) -> Option<&PlotLibraryUnavailable> {
        match self {
            Self::PlotUnavailable(missing) => Some(missing),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BankerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for banker operations
pub type BankerResult<T> = Result<T, BankerError>;
