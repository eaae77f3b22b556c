//! Fragment store facade and the in-memory backend.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use polyweave_model::{Fragment, FragmentKind};

use crate::error::CatalogResult;
use crate::validate::validate_fragments;

/// Read side of a fragment catalog, consumed by editing sessions.
#[async_trait]
pub trait FragmentStore: Send + Sync {
    /// Fetch every fragment of the requested kind, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing catalog cannot deliver the listing.
    async fn fragments(&self, kind: FragmentKind) -> Result<Vec<Fragment>>;
}

/// Catalog backend serving a fixed fragment listing from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFragmentStore {
    fragments: Arc<Vec<Fragment>>,
}

impl MemoryFragmentStore {
    /// Build a store over the provided fragments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::InvalidFragment`] or
    /// [`crate::CatalogError::DuplicateFragment`] when the listing violates
    /// catalog invariants.
    pub fn new(fragments: Vec<Fragment>) -> CatalogResult<Self> {
        validate_fragments(&fragments)?;
        Ok(Self {
            fragments: Arc::new(fragments),
        })
    }
}

#[async_trait]
impl FragmentStore for MemoryFragmentStore {
    async fn fragments(&self, kind: FragmentKind) -> Result<Vec<Fragment>> {
        Ok(self
            .fragments
            .iter()
            .filter(|fragment| fragment.kind == kind)
            .cloned()
            .collect())
    }
}
