use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, trace, warn};

use crate::library::read_title;

use super::cursor::{Direction, first_accepted, step};
use super::events::EventBus;
use super::sink::create_sink;
use super::types::{EngineEvent, LoopMode, MediaItem};

#[derive(Debug)]
pub(super) enum EngineCmd {
    SetQueue(Vec<PathBuf>),
    SetLoopMode(LoopMode),
    Play,
    Stop,
    TogglePause,
    Next,
    Prev,
    /// Stop and drop the sink; the media list stays loaded.
    ReleasePlayer,
    /// Drop the media list and end the thread.
    ReleaseQueue,
}

pub(super) type NowPlayingHandle = Arc<Mutex<Option<MediaItem>>>;

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    ready: SyncSender<Result<(), String>>,
    now_playing: NowPlayingHandle,
    bus: Arc<EventBus>,
    poll_interval: Duration,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("engine".to_string())
        .spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(s) => s,
                Err(e) => {
                    let _ = ready.send(Err(e.to_string()));
                    return;
                }
            };
            // rodio logs to stderr when the stream is dropped; the command prompt shares that terminal.
            stream.log_on_drop(false);
            let _ = ready.send(Ok(()));

            let mut engine = EngineThread {
                stream,
                sink: None,
                items: Vec::new(),
                pos: None,
                paused: false,
                loop_mode: LoopMode::default(),
                now_playing,
                bus,
            };
            engine.run(rx, poll_interval);
        })
}

struct EngineThread {
    stream: OutputStream,
    sink: Option<Sink>,
    items: Vec<PathBuf>,
    pos: Option<usize>,
    paused: bool,
    loop_mode: LoopMode,
    now_playing: NowPlayingHandle,
    bus: Arc<EventBus>,
}

impl EngineThread {
    fn run(&mut self, rx: Receiver<EngineCmd>, poll_interval: Duration) {
        loop {
            match rx.recv_timeout(poll_interval) {
                Ok(cmd) => {
                    if !self.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => self.auto_advance(),
                Err(RecvTimeoutError::Disconnected) => {
                    self.release_player();
                    break;
                }
            }
        }
    }

    /// Apply one command; returns `false` once the thread should exit.
    fn handle(&mut self, cmd: EngineCmd) -> bool {
        trace!(?cmd, "engine command");
        match cmd {
            EngineCmd::SetQueue(items) => {
                self.stop_sink();
                self.items = items;
                self.pos = None;
            }
            EngineCmd::SetLoopMode(mode) => {
                self.loop_mode = mode;
            }
            EngineCmd::Play => {
                if self.sink.is_some() {
                    if self.paused {
                        self.set_paused(false);
                    }
                    return true;
                }
                let start = self.pos.unwrap_or(0);
                if start < self.items.len() && !self.play_from(start, Direction::Forward) {
                    self.finish();
                }
            }
            EngineCmd::Stop => {
                if self.sink.is_some() {
                    self.stop_sink();
                    self.bus.dispatch(&EngineEvent::Stopped);
                }
            }
            EngineCmd::TogglePause => {
                if self.sink.is_some() {
                    self.set_paused(!self.paused);
                } else {
                    debug!("toggle pause ignored: nothing loaded");
                }
            }
            EngineCmd::Next => self.skip(Direction::Forward),
            EngineCmd::Prev => self.skip(Direction::Backward),
            EngineCmd::ReleasePlayer => self.release_player(),
            EngineCmd::ReleaseQueue => {
                self.release_player();
                self.items.clear();
                self.pos = None;
                debug!("media list released");
                return false;
            }
        }
        true
    }

    fn skip(&mut self, direction: Direction) {
        let Some(target) = step(self.pos, self.items.len(), direction, self.loop_mode) else {
            warn!(?direction, "no item to skip to");
            return;
        };
        if !self.play_from(target, direction) && direction == Direction::Forward {
            self.finish();
        }
    }

    fn auto_advance(&mut self) {
        let ended = match self.sink.as_ref() {
            Some(s) => !self.paused && s.empty(),
            None => false,
        };
        if !ended {
            return;
        }

        match step(self.pos, self.items.len(), Direction::Forward, self.loop_mode) {
            Some(next) => {
                if !self.play_from(next, Direction::Forward) {
                    self.finish();
                }
            }
            None => self.finish(),
        }
    }

    /// Start the first playable item at or after `start`, walking in `direction`.
    ///
    /// Each item is tried at most once; returns `false` when none could be
    /// started, leaving the current item and position as they were.
    fn play_from(&mut self, start: usize, direction: Direction) -> bool {
        let items = &self.items;
        let stream = &self.stream;
        let bus = &self.bus;

        let found = first_accepted(start, items.len(), direction, self.loop_mode, |i| {
            let path = &items[i];
            match create_sink(stream, path) {
                Ok(new_sink) => Some(new_sink),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unplayable item");
                    bus.dispatch(&EngineEvent::MediaFailed {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    None
                }
            }
        });

        match found {
            Some((index, new_sink)) => {
                let path = self.items[index].clone();
                self.start(index, path, new_sink);
                true
            }
            None => false,
        }
    }

    fn start(&mut self, index: usize, path: PathBuf, new_sink: Sink) {
        self.stop_sink();
        new_sink.play();
        self.sink = Some(new_sink);
        self.pos = Some(index);
        self.paused = false;

        let title = read_title(&path);
        if let Ok(mut np) = self.now_playing.lock() {
            *np = Some(MediaItem { path, title });
        }
        self.bus.dispatch(&EngineEvent::TrackChanged);
    }

    fn finish(&mut self) {
        self.stop_sink();
        debug!("queue finished");
        self.bus.dispatch(&EngineEvent::QueueFinished);
    }

    fn set_paused(&mut self, paused: bool) {
        let Some(ref s) = self.sink else {
            return;
        };
        if paused {
            s.pause();
        } else {
            s.play();
        }
        self.paused = paused;
        let event = if paused {
            EngineEvent::Paused
        } else {
            EngineEvent::Resumed
        };
        self.bus.dispatch(&event);
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = false;
    }

    fn release_player(&mut self) {
        self.stop_sink();
        if let Ok(mut np) = self.now_playing.lock() {
            *np = None;
        }
    }
}
