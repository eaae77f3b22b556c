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

//! Shared domain types for the Polyweave policy editor.
//!
//! These types are re-used by the fragment catalog and the editing session so
//! the wire shape of a fragment stays a single source of truth. A [`Fragment`]
//! is a reusable building block published by a catalog; a [`Policy`] wires at
//! most one `input` fragment into its pipeline.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Pipeline slot a fragment can occupy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Source side of a pipeline (where records enter).
    Input,
    /// Sink side of a pipeline (where records leave).
    Output,
}

impl FragmentKind {
    #[must_use]
    /// Render the kind as its lowercase string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            other => Err(anyhow!("invalid fragment kind '{other}'")),
        }
    }
}

/// Reusable configuration block published by a fragment catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fragment {
    /// Stable identifier assigned when the fragment entered the catalog.
    pub id: Uuid,
    /// Pipeline slot this fragment can occupy.
    pub kind: FragmentKind,
    /// Display name shown to editors; unique per kind within a catalog.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional human-readable summary of what the fragment does.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    /// Configuration payload copied into a policy when the fragment is wired in.
    pub element: Value,
}

impl Fragment {
    /// Construct a fragment with a fresh identifier and an empty payload.
    #[must_use]
    pub fn new(kind: FragmentKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            description: None,
            element: Value::Null,
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a configuration payload.
    #[must_use]
    pub fn with_element(mut self, element: Value) -> Self {
        self.element = element;
        self
    }
}

/// Editable policy describing one processing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Primary key for the policy record.
    pub id: Uuid,
    /// Friendly identifier displayed in user interfaces.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional human-readable summary of the policy's purpose.
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Input fragment wired into the pipeline, when one has been chosen.
    pub input: Option<Fragment>,
}

impl Policy {
    /// Construct an empty policy with a fresh identifier and no input wired in.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            input: None,
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of the currently wired input fragment, if any.
    #[must_use]
    pub fn input_name(&self) -> Option<&str> {
        self.input.as_ref().map(|fragment| fragment.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fragment_kind_round_trips_through_str() {
        for kind in [FragmentKind::Input, FragmentKind::Output] {
            let parsed: FragmentKind = kind.as_str().parse().expect("parse kind");
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!("sidecar".parse::<FragmentKind>().is_err());
    }

    #[test]
    fn fragment_serializes_kind_as_snake_case() {
        let fragment = Fragment::new(FragmentKind::Input, "file")
            .with_element(json!({"path": "/var/log/app.log"}));
        let value = serde_json::to_value(&fragment).expect("serialize fragment");
        assert_eq!(value["kind"], json!("input"));
        assert_eq!(value["name"], json!("file"));
        assert_eq!(value["element"]["path"], json!("/var/log/app.log"));
        assert!(value.get("description").is_none());
    }

    #[test]
    fn policy_reports_wired_input_name() {
        let mut policy = Policy::new("ingest-logs");
        assert_eq!(policy.input_name(), None);

        policy.input = Some(Fragment::new(FragmentKind::Input, "stream"));
        assert_eq!(policy.input_name(), Some("stream"));
    }
}
