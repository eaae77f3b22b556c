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

//! Policy editing sessions for the Polyweave editor.
//!
//! Layout: `workspace.rs` (the session and the shared policy handle),
//! `selector.rs` (input fragment selection), `error.rs` (structured errors).
//!
//! # Design
//! - A [`PolicyWorkspace`] owns the policy under edit; views reach it through
//!   cloneable [`PolicyHandle`]s instead of a global lookup.
//! - The [`InputSelector`] fetches its listing once at construction and reads
//!   the live policy on every query, so concurrent edits stay visible.

pub mod error;
pub mod selector;
pub mod workspace;

pub use error::{SelectorError, SelectorResult};
pub use selector::InputSelector;
pub use workspace::{PolicyHandle, PolicyWorkspace};
