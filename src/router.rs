//! Event router: turns engine lifecycle events into session state.
//!
//! Runs on the engine's dispatch thread. It is the only writer of the
//! session's current track and the only holder of the termination trigger.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::announce::{Announcer, NowPlaying};
use crate::engine::{EngineEvent, EventKind, PlaybackEngine, SubscriptionId};
use crate::error::EngineError;
use crate::library::display_title;
use crate::session::{StateHandle, TerminationTrigger};

const SUBSCRIBED: [EventKind; 3] = [
    EventKind::TrackChanged,
    EventKind::QueueFinished,
    EventKind::MediaFailed,
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouterPhase {
    Running,
    Terminated,
}

pub struct EventRouter {
    engine: Arc<dyn PlaybackEngine>,
    state: StateHandle,
    trigger: TerminationTrigger,
    extensions: Vec<String>,
    announcers: Vec<Box<dyn Announcer>>,
    phase: Mutex<RouterPhase>,
}

/// Engine subscriptions held by an attached router.
pub struct Subscriptions {
    engine: Arc<dyn PlaybackEngine>,
    ids: Vec<SubscriptionId>,
}

impl Subscriptions {
    /// Unsubscribe everything; the first failure is returned after trying all.
    pub fn detach(self) -> Result<(), EngineError> {
        let mut first_err = None;
        for id in self.ids {
            if let Err(e) = self.engine.unsubscribe(id) {
                warn!(%id, error = %e, "failed to unsubscribe");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl EventRouter {
    /// `extensions` are stripped from engine-reported titles for display.
    pub fn new(
        engine: Arc<dyn PlaybackEngine>,
        state: StateHandle,
        trigger: TerminationTrigger,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            engine,
            state,
            trigger,
            extensions,
            announcers: Vec::new(),
            phase: Mutex::new(RouterPhase::Running),
        }
    }

    pub fn with_announcer(mut self, announcer: Box<dyn Announcer>) -> Self {
        self.announcers.push(announcer);
        self
    }

    pub fn phase(&self) -> RouterPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe `router` to the engine events it handles.
    pub fn attach(router: &Arc<Self>) -> Result<Subscriptions, EngineError> {
        let mut subs = Subscriptions {
            engine: router.engine.clone(),
            ids: Vec::with_capacity(SUBSCRIBED.len()),
        };

        for kind in SUBSCRIBED {
            let r = router.clone();
            match router
                .engine
                .subscribe(kind, Arc::new(move |event: &EngineEvent| r.handle(event)))
            {
                Ok(id) => subs.ids.push(id),
                Err(e) => {
                    let _ = subs.detach();
                    return Err(e);
                }
            }
        }
        Ok(subs)
    }

    pub fn handle(&self, event: &EngineEvent) {
        match event {
            EngineEvent::TrackChanged => self.on_track_changed(),
            EngineEvent::QueueFinished => self.on_queue_finished(),
            EngineEvent::MediaFailed { path, reason } => {
                warn!(path = %path.display(), %reason, "engine skipped an item");
            }
            other => debug!(event = ?other, "unhandled engine event"),
        }
    }

    fn on_track_changed(&self) {
        if self.phase() == RouterPhase::Terminated {
            debug!("track change after termination ignored");
            return;
        }

        let title = match self.engine.current_title() {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "failed to read title of the new track");
                return;
            }
        };
        let path = match self.engine.current_location() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "failed to read location of the new track");
                return;
            }
        };

        let title = display_title(&title, &self.extensions);
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .commit_track(path.clone(), title.clone());

        info!("Now playing: {title}");
        let now = NowPlaying { path, title };
        for announcer in &self.announcers {
            if let Err(e) = announcer.announce(&now) {
                warn!(announcer = announcer.name(), error = %e, "announce failed");
            }
        }
    }

    fn on_queue_finished(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase == RouterPhase::Terminated {
            debug!("queue finished reported again; already terminated");
            return;
        }

        let looping = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loop_mode()
            .is_looping();
        if looping {
            warn!("engine reported the queue finished while looping; stopping anyway");
        }

        *phase = RouterPhase::Terminated;
        drop(phase);

        if self.trigger.fire() {
            info!("queue finished");
        }
    }
}
