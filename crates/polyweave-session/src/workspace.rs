//! Policy editing session state shared between views.
//!
//! # Design
//! - [`PolicyWorkspace`] owns the policy currently under edit;
//!   [`PolicyHandle`] is the cloneable reference views mutate it through.
//! - Lock poisoning is absorbed: the policy is plain data and remains usable
//!   after a panicked writer.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use polyweave_events::{EditorBus, EditorEvent};
use polyweave_model::{Fragment, Policy};
use tracing::info;
use uuid::Uuid;

/// Editing session owning the policy currently under edit.
#[derive(Clone)]
pub struct PolicyWorkspace {
    current: Arc<RwLock<Policy>>,
    events: Option<EditorBus>,
}

impl PolicyWorkspace {
    /// Open a session editing `policy`.
    #[must_use]
    pub fn open(policy: Policy) -> Self {
        Self {
            current: Arc::new(RwLock::new(policy)),
            events: None,
        }
    }

    /// Attach an event bus, announcing the policy already under edit.
    #[must_use]
    pub fn with_events(mut self, events: EditorBus) -> Self {
        let (policy_id, name) = {
            let guard = read_policy(&self.current);
            (guard.id, guard.name.clone())
        };
        let _ = events.publish(EditorEvent::PolicyOpened { policy_id, name });
        self.events = Some(events);
        self
    }

    /// Handle for the policy currently under edit.
    #[must_use]
    pub fn current(&self) -> PolicyHandle {
        PolicyHandle {
            inner: Arc::clone(&self.current),
        }
    }

    /// Swap in a different policy, announcing it when a bus is attached.
    ///
    /// Handles issued earlier keep pointing at the session slot, so they
    /// observe the replacement immediately.
    pub fn replace(&self, policy: Policy) {
        let policy_id = policy.id;
        let name = policy.name.clone();
        *write_policy(&self.current) = policy;
        if let Some(events) = &self.events {
            let _ = events.publish(EditorEvent::PolicyOpened { policy_id, name });
        }
        info!(policy_id = %policy_id, "policy replaced in workspace");
    }
}

/// Cloneable reference to the policy under edit.
#[derive(Clone)]
pub struct PolicyHandle {
    inner: Arc<RwLock<Policy>>,
}

impl PolicyHandle {
    /// Identifier of the policy under edit.
    #[must_use]
    pub fn id(&self) -> Uuid {
        read_policy(&self.inner).id
    }

    /// Clone of the policy as it stands right now.
    #[must_use]
    pub fn snapshot(&self) -> Policy {
        read_policy(&self.inner).clone()
    }

    /// Name of the currently wired input fragment, if any.
    #[must_use]
    pub fn input_name(&self) -> Option<String> {
        read_policy(&self.inner).input_name().map(ToOwned::to_owned)
    }

    /// Wire `fragment` into the input slot, replacing any previous choice.
    pub fn set_input(&self, fragment: Fragment) {
        write_policy(&self.inner).input = Some(fragment);
    }
}

fn read_policy(lock: &RwLock<Policy>) -> RwLockReadGuard<'_, Policy> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_policy(lock: &RwLock<Policy>) -> RwLockWriteGuard<'_, Policy> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
