use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, error, info, warn};

use crate::announce::{DesktopNotifier, TerminalTitle};
use crate::cli::{self, Args};
use crate::config::Settings;
use crate::engine::{EngineOptions, PlaybackEngine, RodioEngine};
use crate::error::InterpreterError;
use crate::interpreter;
use crate::library;
use crate::queue::Queue;
use crate::router::{EventRouter, Subscriptions};
use crate::session::{
    PlaybackSession, StateHandle, TerminationTrigger, TerminationWaiter, termination_signal,
};

pub mod logging;
mod settings;
mod startup;

const WAIT_TICK: Duration = Duration::from_millis(250);

type InterpreterExit = Result<(), InterpreterError>;

pub fn run(args: &Args) -> Result<()> {
    let settings = settings::load_settings(args);
    let root = cli::library_root(&settings);
    info!(root = %root.display(), "library root");

    startup::wait_for_root(
        &root,
        settings.startup.wait_for_root,
        Duration::from_secs(settings.startup.retry_interval_secs),
    )?;

    let tracks = library::scan(&root, &settings.library)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    info!(tracks = tracks.len(), "library scanned");
    let queue = Queue::build(tracks, settings.playback.seed);
    debug!(first = ?queue.tracks().first().map(|t| &t.title), "queue built");

    let engine = RodioEngine::initialize(EngineOptions {
        poll_interval: Duration::from_millis(settings.engine.poll_interval_ms),
    })
    .context("failed to initialize playback engine")?;
    let engine: Arc<dyn PlaybackEngine> = Arc::new(engine);
    let session = Arc::new(PlaybackSession::new(engine.clone()));

    let (trigger, waiter) = termination_signal();
    let router = Arc::new(build_router(
        &settings,
        engine,
        session.state_handle(),
        trigger,
    ));
    let subscriptions =
        EventRouter::attach(&router).context("failed to subscribe to engine events")?;

    if let Err(e) = session.start(&queue, settings.playback.loop_mode.into()) {
        teardown(subscriptions, &session);
        return Err(e).context("failed to start playback");
    }

    let commands = spawn_interpreter(session.clone()).context("failed to start command input")?;
    let outcome = wait_for_end(&waiter, &commands);

    teardown(subscriptions, &session);
    outcome
}

fn build_router(
    settings: &Settings,
    engine: Arc<dyn PlaybackEngine>,
    state: StateHandle,
    trigger: TerminationTrigger,
) -> EventRouter {
    let mut router = EventRouter::new(engine, state, trigger, settings.library.extensions.clone());
    if settings.ui.terminal_title {
        router = router.with_announcer(Box::new(TerminalTitle::stdout()));
    }
    if settings.notifications.enabled {
        router = router.with_announcer(Box::new(DesktopNotifier::spawn(&settings.notifications)));
    }
    router
}

/// Run the command interpreter on stdin. Its exit, for whatever reason, is
/// reported on the returned channel.
fn spawn_interpreter(session: Arc<PlaybackSession>) -> io::Result<Receiver<InterpreterExit>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("commands".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let exit = interpreter::run(stdin.lock(), io::stdout(), &session);
            let _ = tx.send(exit);
        })?;
    Ok(rx)
}

/// Block until the queue finishes or the interpreter dies.
fn wait_for_end(waiter: &TerminationWaiter, commands: &Receiver<InterpreterExit>) -> Result<()> {
    loop {
        if waiter.wait_timeout(WAIT_TICK) {
            info!("playback finished");
            return Ok(());
        }

        match commands.try_recv() {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => {
                error!(error = %e, "command input failed");
                return Err(e).context("command interpreter stopped");
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => bail!("command interpreter exited unexpectedly"),
        }
    }
}

fn teardown(subscriptions: Subscriptions, session: &PlaybackSession) {
    if let Err(e) = subscriptions.detach() {
        warn!(error = %e, "failed to detach event router");
    }
    if let Err(e) = session.shutdown() {
        warn!(error = %e, "engine shutdown incomplete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::engine::EngineEvent;
    use crate::engine::testing::{Call, RecordingEngine};

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        settings.ui.terminal_title = false;
        settings.notifications.enabled = false;
        settings
    }

    #[test]
    fn queue_finished_ends_the_wait() {
        let (trigger, waiter) = termination_signal();
        let (_tx, rx) = mpsc::channel::<InterpreterExit>();

        let firing = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            trigger.fire();
        });

        wait_for_end(&waiter, &rx).unwrap();
        firing.join().unwrap();
    }

    #[test]
    fn signal_fired_before_the_wait_returns_at_once() {
        let (trigger, waiter) = termination_signal();
        let (_tx, rx) = mpsc::channel::<InterpreterExit>();
        trigger.fire();

        let started = std::time::Instant::now();
        wait_for_end(&waiter, &rx).unwrap();
        assert!(started.elapsed() < WAIT_TICK);
    }

    #[test]
    fn interpreter_failure_ends_the_wait_with_an_error() {
        let (_trigger, waiter) = termination_signal();
        let (tx, rx) = mpsc::channel::<InterpreterExit>();
        tx.send(Err(InterpreterError::InputClosed)).unwrap();

        let err = wait_for_end(&waiter, &rx).unwrap_err();
        assert!(format!("{err:#}").contains("command input closed"));
    }

    #[test]
    fn vanished_interpreter_is_an_error() {
        let (_trigger, waiter) = termination_signal();
        let (tx, rx) = mpsc::channel::<InterpreterExit>();
        drop(tx);

        assert!(wait_for_end(&waiter, &rx).is_err());
    }

    #[test]
    fn router_from_settings_terminates_on_queue_finished() {
        let recording = Arc::new(RecordingEngine::new());
        let engine: Arc<dyn PlaybackEngine> = recording.clone();
        let session = PlaybackSession::new(engine.clone());
        let (trigger, waiter) = termination_signal();

        let router = Arc::new(build_router(
            &quiet_settings(),
            engine,
            session.state_handle(),
            trigger,
        ));
        let subscriptions = EventRouter::attach(&router).unwrap();

        recording.set_now_playing("/m/clip.webm", "clip.webm");
        recording.emit(EngineEvent::TrackChanged);
        recording.emit(EngineEvent::QueueFinished);

        assert!(waiter.is_fired());
        let state = session.state_handle();
        assert_eq!(
            state.lock().unwrap().current_track(),
            Some(&PathBuf::from("/m/clip.webm"))
        );

        teardown(subscriptions, &session);
        assert_eq!(recording.subscriber_count(), 0);
        assert_eq!(
            recording.commands(),
            vec![Call::Stop, Call::ReleasePlayer, Call::ReleaseQueue]
        );
    }
}
