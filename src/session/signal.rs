//! One-shot termination signal.
//!
//! Split into a trigger half, handed to the event router only, and a waiter
//! half for the main control path. Firing twice is a no-op.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct Shared {
    fired: Mutex<bool>,
    cond: Condvar,
}

#[derive(Clone)]
pub struct TerminationTrigger {
    shared: Arc<Shared>,
}

#[derive(Clone)]
pub struct TerminationWaiter {
    shared: Arc<Shared>,
}

pub fn termination_signal() -> (TerminationTrigger, TerminationWaiter) {
    let shared = Arc::new(Shared::default());
    (
        TerminationTrigger {
            shared: shared.clone(),
        },
        TerminationWaiter { shared },
    )
}

impl TerminationTrigger {
    /// Fire the signal. Returns `true` only for the call that actually fired it.
    pub fn fire(&self) -> bool {
        let mut fired = self
            .shared
            .fired
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *fired {
            return false;
        }
        *fired = true;
        self.shared.cond.notify_all();
        true
    }
}

impl TerminationWaiter {
    #[cfg(test)]
    pub fn is_fired(&self) -> bool {
        *self
            .shared
            .fired
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for at most `timeout`; returns whether the signal has fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let fired = self
            .shared
            .fired
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (fired, _) = self
            .shared
            .cond
            .wait_timeout_while(fired, timeout, |fired| !*fired)
            .unwrap_or_else(PoisonError::into_inner);
        *fired
    }
}
