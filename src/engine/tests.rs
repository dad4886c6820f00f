use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::cursor::{Direction, first_accepted, step};
use super::events::EventBus;
use super::types::{EngineEvent, EventKind, LoopMode};

#[test]
fn step_forward_walks_then_stops_without_loop() {
    assert_eq!(step(None, 3, Direction::Forward, LoopMode::NoLoop), Some(0));
    assert_eq!(step(Some(0), 3, Direction::Forward, LoopMode::NoLoop), Some(1));
    assert_eq!(step(Some(2), 3, Direction::Forward, LoopMode::NoLoop), None);
}

#[test]
fn step_wraps_both_ends_with_loop_all() {
    assert_eq!(step(Some(2), 3, Direction::Forward, LoopMode::LoopAll), Some(0));
    assert_eq!(step(Some(0), 3, Direction::Backward, LoopMode::LoopAll), Some(2));
    assert_eq!(step(None, 3, Direction::Backward, LoopMode::LoopAll), Some(2));
}

#[test]
fn step_backward_without_loop_stops_at_start() {
    assert_eq!(step(Some(1), 3, Direction::Backward, LoopMode::NoLoop), Some(0));
    assert_eq!(step(Some(0), 3, Direction::Backward, LoopMode::NoLoop), None);
    assert_eq!(step(None, 3, Direction::Backward, LoopMode::NoLoop), None);
}

#[test]
fn step_on_empty_or_single_queue() {
    assert_eq!(step(None, 0, Direction::Forward, LoopMode::LoopAll), None);
    assert_eq!(step(Some(0), 1, Direction::Forward, LoopMode::NoLoop), None);
    assert_eq!(step(Some(0), 1, Direction::Forward, LoopMode::LoopAll), Some(0));
}

#[test]
fn refused_backward_walk_gives_up_at_the_start() {
    let pos = Some(2);
    let mut tried = Vec::new();

    let target = step(pos, 3, Direction::Backward, LoopMode::NoLoop).unwrap();
    let found = first_accepted(target, 3, Direction::Backward, LoopMode::NoLoop, |i| {
        tried.push(i);
        None::<()>
    });

    assert_eq!(found, None);
    assert_eq!(tried, vec![1, 0]);
}

#[test]
fn looping_walk_offers_each_item_once() {
    let mut tried = Vec::new();
    let found = first_accepted(1, 3, Direction::Forward, LoopMode::LoopAll, |i| {
        tried.push(i);
        None::<()>
    });

    assert_eq!(found, None);
    assert_eq!(tried, vec![1, 2, 0]);
}

#[test]
fn walk_stops_at_the_first_accepted_item() {
    let found = first_accepted(3, 4, Direction::Backward, LoopMode::NoLoop, |i| {
        (i == 1).then(|| format!("item {i}"))
    });
    assert_eq!(found, Some((1, "item 1".to_string())));
    assert_eq!(first_accepted(5, 4, Direction::Forward, LoopMode::LoopAll, Some), None);
}

#[test]
fn bus_delivers_only_to_matching_kind() {
    let bus = EventBus::new();
    let changed = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));

    let c = changed.clone();
    bus.subscribe(
        EventKind::TrackChanged,
        Arc::new(move |_: &EngineEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        }),
    );
    let f = finished.clone();
    bus.subscribe(
        EventKind::QueueFinished,
        Arc::new(move |_: &EngineEvent| {
            f.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert_eq!(bus.dispatch(&EngineEvent::TrackChanged), 1);
    assert_eq!(bus.dispatch(&EngineEvent::TrackChanged), 1);
    assert_eq!(bus.dispatch(&EngineEvent::Paused), 0);
    assert_eq!(
        bus.dispatch(&EngineEvent::MediaFailed {
            path: PathBuf::from("/x.mp4"),
            reason: "bad".into()
        }),
        0
    );

    assert_eq!(changed.load(Ordering::SeqCst), 2);
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[test]
fn bus_unsubscribe_stops_delivery_and_rejects_unknown_ids() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    let id = bus.subscribe(
        EventKind::Stopped,
        Arc::new(move |_: &EngineEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        }),
    );

    bus.dispatch(&EngineEvent::Stopped);
    bus.unsubscribe(id).unwrap();
    bus.dispatch(&EngineEvent::Stopped);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(bus.is_empty());
    assert!(bus.unsubscribe(id).is_err());
}

#[test]
fn bus_callbacks_may_reenter_the_bus() {
    let bus = Arc::new(EventBus::new());
    let inner = bus.clone();
    bus.subscribe(
        EventKind::TrackChanged,
        Arc::new(move |_: &EngineEvent| {
            // Would deadlock if dispatch held the registry lock.
            inner.subscribe(EventKind::Paused, Arc::new(|_: &EngineEvent| {}));
        }),
    );

    bus.dispatch(&EngineEvent::TrackChanged);
    assert_eq!(bus.len(), 2);
}

#[test]
fn event_kind_matches_variant() {
    assert_eq!(EngineEvent::QueueFinished.kind(), EventKind::QueueFinished);
    assert_eq!(EngineEvent::Resumed.kind(), EventKind::Resumed);
    assert_eq!(
        EngineEvent::MediaFailed {
            path: PathBuf::new(),
            reason: String::new()
        }
        .kind(),
        EventKind::MediaFailed
    );
}
