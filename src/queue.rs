//! Randomized play queue.
//!
//! The queue is built once at startup by drawing tracks without replacement:
//! pick a uniformly random index from the remaining pool, take it out, append
//! it. Every ordering of the library is equally likely.

use std::collections::HashSet;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::library::Track;

/// Playback order handed to the engine. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Shuffle `candidates` with the supplied random source.
    ///
    /// Tracks sharing a path are collapsed to their first occurrence so the
    /// queue never holds duplicates.
    pub fn shuffled<R: Rng>(candidates: Vec<Track>, rng: &mut R) -> Self {
        let mut seen = HashSet::new();
        let mut pool: Vec<Track> = candidates
            .into_iter()
            .filter(|t| seen.insert(t.path.clone()))
            .collect();

        let mut tracks = Vec::with_capacity(pool.len());
        while !pool.is_empty() {
            let k = rng.gen_range(0..pool.len());
            let track = pool.swap_remove(k);
            trace!(path = %track.path.display(), "picked");
            tracks.push(track);
        }

        Self { tracks }
    }

    /// Shuffle with a fixed seed when one is given, otherwise with the thread RNG.
    pub fn build(candidates: Vec<Track>, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::shuffled(candidates, &mut StdRng::seed_from_u64(seed)),
            None => Self::shuffled(candidates, &mut rand::thread_rng()),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.tracks.iter().map(|t| t.path.clone()).collect()
    }
}
