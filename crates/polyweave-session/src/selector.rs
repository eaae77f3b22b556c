//! Input selection for the policy under edit.
//!
//! # Design
//! - One-shot: the fragment listing is fetched during
//!   [`InputSelector::initialize`] and never refetched; a fetch failure leaves
//!   no selector behind, and callers retry with a fresh call.
//! - Selection mutates the policy through the shared [`PolicyHandle`], so
//!   every view of the session observes the same input slot.
//! - Out-of-range indices are rejected loudly instead of ignored; a stale view
//!   finds out immediately that its listing no longer matches.

use polyweave_catalog::FragmentStore;
use polyweave_events::{EditorBus, EditorEvent};
use polyweave_model::{Fragment, FragmentKind};
use tracing::{info, instrument, warn};

use crate::error::{SelectorError, SelectorResult};
use crate::workspace::{PolicyHandle, PolicyWorkspace};

/// View-facing selector for the input slot of the policy under edit.
pub struct InputSelector {
    policy: PolicyHandle,
    events: EditorBus,
    fragments: Vec<Fragment>,
}

impl InputSelector {
    /// Build a selector for the session's current policy by fetching the
    /// input fragment listing from `store`.
    ///
    /// The outcome is announced on `events` either way: a
    /// [`EditorEvent::FragmentsLoaded`] with the listing size, or a
    /// [`EditorEvent::FragmentsUnavailable`] carrying the failure detail.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::FragmentsUnavailable`] when the catalog cannot
    /// deliver the listing; no selector is constructed.
    #[instrument(name = "selector.initialize", skip_all)]
    pub async fn initialize<S>(
        workspace: &PolicyWorkspace,
        store: &S,
        events: EditorBus,
    ) -> SelectorResult<Self>
    where
        S: FragmentStore + ?Sized,
    {
        let policy = workspace.current();
        let policy_id = policy.id();
        match store.fragments(FragmentKind::Input).await {
            Ok(fragments) => {
                info!(policy_id = %policy_id, count = fragments.len(), "input fragments loaded");
                let _ = events.publish(EditorEvent::FragmentsLoaded {
                    policy_id,
                    fragment_kind: FragmentKind::Input,
                    count: fragments.len(),
                });
                Ok(Self {
                    policy,
                    events,
                    fragments,
                })
            }
            Err(source) => {
                warn!(
                    policy_id = %policy_id,
                    error = %source,
                    "input fragments unavailable"
                );
                let _ = events.publish(EditorEvent::FragmentsUnavailable {
                    policy_id,
                    fragment_kind: FragmentKind::Input,
                    message: format!("{source:#}"),
                });
                Err(SelectorError::FragmentsUnavailable {
                    fragment_kind: FragmentKind::Input,
                    source,
                })
            }
        }
    }

    /// Fragments available for selection, in catalog order.
    #[must_use]
    pub fn input_list(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Wire the fragment at `index` into the policy's input slot.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::IndexOutOfRange`] when `index` does not name a
    /// held fragment; the policy is left untouched.
    pub fn select(&self, index: usize) -> SelectorResult<()> {
        let Some(fragment) = self.fragments.get(index) else {
            warn!(index, len = self.fragments.len(), "selection index out of range");
            return Err(SelectorError::IndexOutOfRange {
                index,
                len: self.fragments.len(),
            });
        };
        let policy_id = self.policy.id();
        self.policy.set_input(fragment.clone());
        info!(policy_id = %policy_id, fragment = %fragment.name, "input fragment selected");
        let _ = self.events.publish(EditorEvent::InputSelected {
            policy_id,
            fragment_id: fragment.id,
            name: fragment.name.clone(),
        });
        Ok(())
    }

    /// Whether the named fragment is the one wired into the policy's input
    /// slot right now.
    ///
    /// Reads the live policy rather than selector state, so a selection made
    /// through another handle is reflected here as well.
    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.policy
            .input_name()
            .is_some_and(|current| current == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyweave_catalog::MemoryFragmentStore;
    use polyweave_model::Policy;

    async fn selector_with(fragments: Vec<Fragment>) -> (PolicyWorkspace, InputSelector) {
        let workspace = PolicyWorkspace::open(Policy::new("ingest-logs"));
        let store = MemoryFragmentStore::new(fragments).expect("valid listing");
        let selector = InputSelector::initialize(&workspace, &store, EditorBus::new())
            .await
            .expect("selector initializes");
        (workspace, selector)
    }

    #[tokio::test]
    async fn out_of_range_selection_leaves_the_policy_untouched() {
        let (workspace, selector) = selector_with(vec![
            Fragment::new(FragmentKind::Input, "file"),
            Fragment::new(FragmentKind::Input, "stream"),
        ])
        .await;

        let err = selector.select(5).expect_err("index past the list");
        assert!(matches!(
            err,
            SelectorError::IndexOutOfRange { index: 5, len: 2 }
        ));
        assert_eq!(workspace.current().input_name(), None);
        assert!(!selector.is_selected("file"));
    }

    #[tokio::test]
    async fn empty_listing_rejects_every_index() {
        let (_workspace, selector) = selector_with(Vec::new()).await;
        assert!(selector.input_list().is_empty());

        let err = selector.select(0).expect_err("nothing to select");
        assert!(matches!(
            err,
            SelectorError::IndexOutOfRange { index: 0, len: 0 }
        ));
    }

    #[tokio::test]
    async fn reselection_replaces_the_previous_choice() {
        let (workspace, selector) = selector_with(vec![
            Fragment::new(FragmentKind::Input, "file"),
            Fragment::new(FragmentKind::Input, "stream"),
        ])
        .await;

        selector.select(0).expect("first selection");
        assert!(selector.is_selected("file"));

        selector.select(1).expect("second selection");
        assert!(selector.is_selected("stream"));
        assert!(!selector.is_selected("file"));
        assert_eq!(workspace.current().input_name().as_deref(), Some("stream"));
    }
}
