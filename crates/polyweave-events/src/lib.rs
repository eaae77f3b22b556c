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

//! Editor event bus for the Polyweave platform.
//!
//! The bus provides a typed event enum, sequential identifiers, and support for
//! replaying recent events when observers attach mid-session (e.g. a panel that
//! opens after the policy was loaded). Internally it uses `tokio::broadcast`
//! with a bounded replay ring; when the ring overflows, the oldest events are
//! dropped.
//!
//! # Design
//! - `payloads.rs` holds the event enum and envelope; `bus.rs` the routing.
//! - Subscribers drain their replay backlog before touching the live channel,
//!   so an observer never sees a selection without the load that preceded it.

pub mod bus;
pub mod payloads;

pub use bus::{EditorBus, EventStream};
pub use payloads::{DEFAULT_REPLAY_CAPACITY, EditorEvent, EventEnvelope, EventId};
