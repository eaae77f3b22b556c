//! JSON catalog documents and the file-backed store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use polyweave_model::{Fragment, FragmentKind};

use crate::error::{CatalogError, CatalogResult};
use crate::store::FragmentStore;
use crate::validate::validate_fragments;

/// On-disk shape of a fragment catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Fragment records in the order the catalog publishes them.
    pub fragments: Vec<FragmentRecord>,
}

/// One fragment entry as written in a catalog document.
///
/// Records carry the kind as a raw keyword so a bad entry surfaces as a
/// structured validation error instead of a serde failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Stable identifier; minted at load time when omitted.
    pub id: Option<Uuid>,
    /// Pipeline slot keyword (`input` or `output`).
    pub kind: String,
    /// Display name shown to editors.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional human-readable summary.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    /// Configuration payload copied into policies.
    pub element: Value,
}

impl FragmentRecord {
    fn into_fragment(self) -> CatalogResult<Fragment> {
        let kind: FragmentKind = self.kind.parse().map_err(|_| CatalogError::InvalidFragment {
            field: "kind",
            reason: "unknown",
            value: Some(self.kind.clone()),
        })?;
        Ok(Fragment {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            kind,
            name: self.name,
            description: self.description,
            element: self.element,
        })
    }
}

impl CatalogDocument {
    /// Convert the document into validated fragments, minting identifiers for
    /// records that omit one. Document order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidFragment`] for an unknown kind keyword or
    /// a blank name, and [`CatalogError::DuplicateFragment`] for a repeated
    /// `(kind, name)` pair.
    pub fn into_fragments(self) -> CatalogResult<Vec<Fragment>> {
        let fragments = self
            .fragments
            .into_iter()
            .map(FragmentRecord::into_fragment)
            .collect::<CatalogResult<Vec<_>>>()?;
        validate_fragments(&fragments)?;
        Ok(fragments)
    }
}

/// Catalog backend that reads a JSON document from disk once at load time.
#[derive(Debug, Clone)]
pub struct JsonFragmentStore {
    path: PathBuf,
    fragments: Arc<Vec<Fragment>>,
}

impl JsonFragmentStore {
    /// Load and validate the catalog document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the document cannot be read,
    /// [`CatalogError::Json`] when it is not valid JSON, and the
    /// [`CatalogDocument::into_fragments`] errors when its contents violate
    /// catalog invariants.
    #[instrument(name = "catalog.load", skip(path))]
    pub async fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::io("document.read", path, source))?;
        let document: CatalogDocument = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::json("document.parse", path, source))?;
        let fragments = document.into_fragments()?;
        info!(path = %path.display(), count = fragments.len(), "fragment catalog loaded");
        Ok(Self {
            path: path.to_path_buf(),
            fragments: Arc::new(fragments),
        })
    }

    /// Path the catalog document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FragmentStore for JsonFragmentStore {
    async fn fragments(&self, kind: FragmentKind) -> Result<Vec<Fragment>> {
        Ok(self
            .fragments
            .iter()
            .filter(|fragment| fragment.kind == kind)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(kind: &str, name: &str) -> FragmentRecord {
        FragmentRecord {
            id: None,
            kind: kind.to_string(),
            name: name.to_string(),
            description: None,
            element: Value::Null,
        }
    }

    #[test]
    fn mints_identifiers_for_records_without_one() {
        let explicit = Uuid::from_u128(9);
        let document = CatalogDocument {
            fragments: vec![
                FragmentRecord {
                    id: Some(explicit),
                    ..record("input", "file")
                },
                record("input", "stream"),
            ],
        };
        let fragments = document.into_fragments().expect("valid document");
        assert_eq!(fragments[0].id, explicit);
        assert_ne!(fragments[1].id, Uuid::nil());
    }

    #[test]
    fn rejects_unknown_kind_keywords() {
        let document = CatalogDocument {
            fragments: vec![record("sidecar", "file")],
        };
        let err = document.into_fragments().expect_err("unknown kind");
        match err {
            CatalogError::InvalidFragment { field, value, .. } => {
                assert_eq!(field, "kind");
                assert_eq!(value.as_deref(), Some("sidecar"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn document_round_trips_through_json() {
        let document = CatalogDocument {
            fragments: vec![FragmentRecord {
                element: json!({"path": "/var/spool"}),
                ..record("input", "file")
            }],
        };
        let raw = serde_json::to_string(&document).expect("serialize document");
        let parsed: CatalogDocument = serde_json::from_str(&raw).expect("parse document");
        assert_eq!(parsed.fragments.len(), 1);
        assert_eq!(parsed.fragments[0].name, "file");
        assert_eq!(parsed.fragments[0].element["path"], json!("/var/spool"));
    }
}
