//! Queue navigation shared by manual skips and auto-advance.

use super::types::LoopMode;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Position reached by moving one step from `pos` in a queue of `len` items.
///
/// `None` for `pos` means nothing has played yet. Returns `None` when the move
/// would run off either end without looping.
pub(crate) fn step(
    pos: Option<usize>,
    len: usize,
    direction: Direction,
    loop_mode: LoopMode,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let wraps = loop_mode.is_looping();

    match (pos, direction) {
        (None, Direction::Forward) => Some(0),
        (None, Direction::Backward) => wraps.then(|| len - 1),
        (Some(p), Direction::Forward) => {
            if p + 1 < len {
                Some(p + 1)
            } else {
                wraps.then_some(0)
            }
        }
        (Some(p), Direction::Backward) => {
            if p > 0 && p <= len {
                Some(p - 1)
            } else {
                wraps.then(|| len - 1)
            }
        }
    }
}

/// Offer indices to `try_item` starting at `start` and stepping in
/// `direction` until it yields a value.
///
/// Each index is offered at most once. Returns `None` when the walk runs off
/// the queue or every item was refused; the caller's position is untouched.
pub(crate) fn first_accepted<T>(
    start: usize,
    len: usize,
    direction: Direction,
    loop_mode: LoopMode,
    mut try_item: impl FnMut(usize) -> Option<T>,
) -> Option<(usize, T)> {
    let mut candidate = (start < len).then_some(start);
    let mut attempts = 0;

    while let Some(i) = candidate {
        if attempts >= len {
            break;
        }
        attempts += 1;

        if let Some(value) = try_item(i) {
            return Some((i, value));
        }
        candidate = step(Some(i), len, direction, loop_mode);
    }
    None
}
