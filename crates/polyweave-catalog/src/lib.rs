#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Fragment catalogs that feed the Polyweave policy editor.
//!
//! Layout: `store.rs` (the [`FragmentStore`] facade and the in-memory backend),
//! `document.rs` (JSON catalog documents and the file-backed backend),
//! `validate.rs` (catalog validation helpers), `error.rs` (structured errors).

pub mod document;
pub mod error;
pub mod store;
pub mod validate;

pub use document::{CatalogDocument, FragmentRecord, JsonFragmentStore};
pub use error::{CatalogError, CatalogResult};
pub use store::{FragmentStore, MemoryFragmentStore};
pub use validate::validate_fragments;
