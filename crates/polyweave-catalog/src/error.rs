//! # Design
//!
//! - Provide structured, constant-message errors for catalog loading.
//! - Carry the path, field, and offending value so a bad document is
//!   diagnosable from the error alone.
//! - Preserve source errors without interpolating context into error messages.

use std::io;
use std::path::PathBuf;

use polyweave_model::FragmentKind;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors produced while loading or validating a fragment catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO failures while reading a catalog document.
    #[error("catalog io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// JSON parsing failures for a catalog document.
    #[error("catalog json failure")]
    Json {
        /// Operation that triggered the JSON failure.
        operation: &'static str,
        /// Path involved in the JSON failure.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// Fragment validation failures.
    #[error("catalog invalid fragment")]
    InvalidFragment {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// Two fragments of the same kind claimed the same display name.
    #[error("catalog duplicate fragment")]
    DuplicateFragment {
        /// Pipeline slot both fragments claimed.
        kind: FragmentKind,
        /// Display name both fragments claimed.
        name: String,
    },
}

impl CatalogError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: serde_json::Error,
    ) -> Self {
        Self::Json {
            operation,
            path: path.into(),
            source,
        }
    }
}
