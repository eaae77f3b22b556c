//! Event payload types emitted during a policy editing session.

use chrono::{DateTime, Utc};
use polyweave_model::FragmentKind;
use uuid::Uuid;

/// Identifier assigned to each event emitted during a session.
pub type EventId = u64;

/// Default capacity of the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Typed editor events surfaced to session observers.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// A policy became the current subject of the editing session.
    PolicyOpened {
        /// Identifier for the policy now under edit.
        policy_id: Uuid,
        /// Display name associated with the policy.
        name: String,
    },
    /// A fragment listing was fetched for the policy under edit.
    FragmentsLoaded {
        /// Identifier for the policy the listing was fetched for.
        policy_id: Uuid,
        /// Pipeline slot the listed fragments can occupy.
        fragment_kind: FragmentKind,
        /// Number of fragments the catalog returned.
        count: usize,
    },
    /// The fragment catalog failed to deliver a listing.
    FragmentsUnavailable {
        /// Identifier for the policy the listing was fetched for.
        policy_id: Uuid,
        /// Pipeline slot the failed listing was for.
        fragment_kind: FragmentKind,
        /// Human-readable error detail describing the failure.
        message: String,
    },
    /// A fragment was wired into the input slot of the policy under edit.
    InputSelected {
        /// Identifier for the policy that was updated.
        policy_id: Uuid,
        /// Identifier for the fragment now wired in.
        fragment_id: Uuid,
        /// Display name of the fragment now wired in.
        name: String,
    },
}

impl EditorEvent {
    /// Machine-friendly discriminator for log and stream consumers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PolicyOpened { .. } => "policy_opened",
            Self::FragmentsLoaded { .. } => "fragments_loaded",
            Self::FragmentsUnavailable { .. } => "fragments_unavailable",
            Self::InputSelected { .. } => "input_selected",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct EventEnvelope {
    /// Sequential identifier assigned at publish time.
    pub id: EventId,
    /// Emission timestamp recorded by the bus.
    pub timestamp: DateTime<Utc>,
    /// The event payload itself.
    pub event: EditorEvent,
}
