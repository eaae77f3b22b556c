//! Event bus routing with replay for late observers.

use crate::payloads::{DEFAULT_REPLAY_CAPACITY, EditorEvent, EventEnvelope, EventId};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

/// Replay ring and id counter guarded by a single lock so an envelope's id and
/// its position in the ring never disagree.
struct Shared {
    next_id: EventId,
    replay: VecDeque<EventEnvelope>,
}

/// Shared editor event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EditorBus {
    sender: Sender<EventEnvelope>,
    shared: Arc<Mutex<Shared>>,
    replay_capacity: usize,
}

impl EditorBus {
    /// Construct a bus with a custom replay capacity.
    ///
    /// The broadcast channel shares the ring's capacity, so overflow affects
    /// both structures together.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "editor bus capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            shared: Arc::new(Mutex::new(Shared {
                next_id: 1,
                replay: VecDeque::with_capacity(capacity),
            })),
            replay_capacity: capacity,
        }
    }

    /// Construct a bus with the default ring capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish a new event to the bus, assigning it a sequential identifier.
    #[must_use]
    pub fn publish(&self, event: EditorEvent) -> EventId {
        let envelope = {
            let mut shared = self.lock_shared();
            let id = shared.next_id;
            shared.next_id = id.saturating_add(1);
            let envelope = EventEnvelope {
                id,
                timestamp: Utc::now(),
                event,
            };
            if shared.replay.len() == self.replay_capacity {
                let _ = shared.replay.pop_front();
            }
            shared.replay.push_back(envelope.clone());
            envelope
        };

        let id = envelope.id;
        let _ = self.sender.send(envelope);
        id
    }

    /// Subscribe to the bus, replaying any buffered events newer than
    /// `since_id` before live events are delivered.
    #[must_use]
    pub fn subscribe(&self, since_id: Option<EventId>) -> EventStream {
        let backlog = since_id.map_or_else(VecDeque::new, |since| {
            let shared = self.lock_shared();
            shared
                .replay
                .iter()
                .filter(|envelope| envelope.id > since)
                .cloned()
                .collect()
        });

        EventStream {
            backlog,
            receiver: self.sender.subscribe(),
        }
    }

    /// Last assigned identifier, if any events have been published.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock_shared().replay.back().map(|envelope| envelope.id)
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EditorBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper that yields events from the replay backlog first, then from
/// the live broadcast channel.
pub struct EventStream {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event, draining the replay backlog first.
    ///
    /// Returns `None` once every sender has been dropped. A lagged receiver
    /// skips ahead to the oldest retained event instead of erroring out.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(envelope) = self.backlog.pop_front() {
            return Some(envelope);
        }

        match self.receiver.recv().await {
            Ok(envelope) => Some(envelope),
            Err(broadcast::error::RecvError::Lagged(_)) => self.receiver.recv().await.ok(),
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyweave_model::FragmentKind;
    use uuid::Uuid;

    fn sample_loaded_event(count: usize) -> EditorEvent {
        EditorEvent::FragmentsLoaded {
            policy_id: Uuid::from_u128(42),
            fragment_kind: FragmentKind::Input,
            count,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_and_replays_since() {
        let bus = EditorBus::with_capacity(16);

        let mut last_id = 0;
        for count in 0..5 {
            last_id = bus.publish(sample_loaded_event(count));
        }
        assert_eq!(last_id, 5);
        assert_eq!(bus.last_event_id(), Some(5));

        let mut stream = bus.subscribe(Some(2));
        let mut received = Vec::new();
        for _ in 0..3 {
            if let Some(envelope) = stream.next().await {
                received.push(envelope.id);
            }
        }
        assert_eq!(received, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn backlog_precedes_live_events() {
        let bus = EditorBus::with_capacity(8);
        let first = bus.publish(sample_loaded_event(1));

        let mut stream = bus.subscribe(Some(0));
        let second = bus.publish(EditorEvent::InputSelected {
            policy_id: Uuid::from_u128(42),
            fragment_id: Uuid::from_u128(43),
            name: "file".into(),
        });

        let replayed = stream.next().await.expect("replayed envelope");
        assert_eq!(replayed.id, first);
        assert_eq!(replayed.event.kind(), "fragments_loaded");

        let live = stream.next().await.expect("live envelope");
        assert_eq!(live.id, second);
        assert_eq!(live.event.kind(), "input_selected");
    }

    #[tokio::test]
    async fn replay_ring_drops_oldest_when_full() {
        let bus = EditorBus::with_capacity(2);
        for count in 0..3 {
            let _ = bus.publish(sample_loaded_event(count));
        }

        let mut stream = bus.subscribe(Some(0));
        let mut replayed = Vec::new();
        for _ in 0..2 {
            if let Some(envelope) = stream.next().await {
                replayed.push(envelope.id);
            }
        }
        assert_eq!(replayed, vec![2, 3]);
    }
}
