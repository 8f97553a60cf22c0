//! Unified error types for fleet-eol.
//!
//! Collaborator failures (unreachable API, unreadable inventory) surface
//! here and abort the run. The lifecycle engine itself never produces these:
//! malformed row data becomes a [`crate::model::SupportStatus`], per the
//! never-raise contract of the core.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fleet-eol operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FleetEolError {
    /// Errors while reading or interpreting the device inventory
    #[error("Failed to read inventory: {context}")]
    Inventory {
        context: String,
        #[source]
        source: InventoryErrorKind,
    },

    /// Errors while obtaining build data
    #[error("Build-data acquisition failed: {context}")]
    Enrichment {
        context: String,
        #[source]
        source: EnrichmentErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific inventory error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InventoryErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array of row objects, found {0}")]
    NotAnArray(String),

    #[error("Expected a row object, found {0}")]
    NotAnObject(String),

    #[error("Missing required column '{column}' in row {row}")]
    MissingColumn { column: String, row: usize },
}

/// Specific build-data error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EnrichmentErrorKind {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Build-data file missing for family '{0}'")]
    MissingFamily(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

/// Convenient Result type for fleet-eol operations
pub type Result<T> = std::result::Result<T, FleetEolError>;

impl FleetEolError {
    /// Create an inventory error with context
    pub fn inventory(context: impl Into<String>, source: InventoryErrorKind) -> Self {
        Self::Inventory {
            context: context.into(),
            source,
        }
    }

    /// Create a build-data error with context
    pub fn enrichment(context: impl Into<String>, source: EnrichmentErrorKind) -> Self {
        Self::Enrichment {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for FleetEolError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FleetEolError {
    fn from(err: serde_json::Error) -> Self {
        Self::inventory(
            "JSON deserialization",
            InventoryErrorKind::InvalidJson(err.to_string()),
        )
    }
}
