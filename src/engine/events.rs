//! Subscriber registry used by engines to fan events out to callbacks.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::EngineError;

use super::types::{EngineEvent, EventKind};

pub type EventCallback = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    callback: EventCallback,
}

#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: EventKind, callback: EventCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber { id, kind, callback });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<(), EngineError> {
        let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|s| s.id != id);
        if subs.len() == before {
            return Err(EngineError::UnknownSubscription(id.0));
        }
        Ok(())
    }

    /// Deliver `event` to every subscriber of its kind and return how many got it.
    ///
    /// Callbacks run after the registry lock is released, so a callback may
    /// subscribe, unsubscribe or call back into the engine.
    pub fn dispatch(&self, event: &EngineEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<EventCallback> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.callback.clone())
            .collect();

        for callback in &targets {
            callback(event);
        }
        targets.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
