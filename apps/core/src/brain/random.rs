//! Injectable "pick one of N" capability.
//!
//! The generic-pool fallback is the only non-deterministic step of the brain;
//! it goes through [`RandomSource`] so tests can pin the choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform pick from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible uniform picks from a fixed seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each index is reduced modulo `len`, so any sequence is valid.
pub struct FixedSequence {
    picks: Vec<usize>,
    cursor: AtomicUsize,
}

impl FixedSequence {
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for FixedSequence {
    fn pick(&self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let step = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.picks[step % self.picks.len()] % len
    }
}
