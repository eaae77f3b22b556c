//! # Design
//!
//! - Provide structured, constant-message errors for selector operations.
//! - Keep the catalog failure's `anyhow` source chain intact for diagnostics.
//! - Carry enough context (index, list length) to make failures reproducible.

use polyweave_model::FragmentKind;
use thiserror::Error;

/// Result type for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Errors produced by the input selector.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// The fragment catalog failed to deliver a listing.
    #[error("selector fragments unavailable")]
    FragmentsUnavailable {
        /// Pipeline slot the failed listing was for.
        fragment_kind: FragmentKind,
        /// Underlying catalog failure.
        source: anyhow::Error,
    },
    /// A selection index fell outside the held fragment list.
    #[error("selector index out of range")]
    IndexOutOfRange {
        /// Index requested by the caller.
        index: usize,
        /// Number of fragments available for selection.
        len: usize,
    },
}
