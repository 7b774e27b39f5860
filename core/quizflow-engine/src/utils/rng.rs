use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Single injection point for randomness. Everything random in the engine
/// (session sampling, option shuffling, lifeline draws) goes through this
/// trait so a fixed-seed source can reproduce a full play-through in tests.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next(&mut self) -> f64;
}

/// Production source backed by the thread-local generator.
#[derive(Default)]
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl RandomSource for ThreadRandom {
    fn next(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Deterministic source for tests and reproducible demo runs.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Uniform index into a slice of length `len`. Caller guarantees `len > 0`.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index on empty range");
    let idx = (rng.next() * len as f64) as usize;
    idx.min(len - 1)
}

/// Uniform integer in the inclusive range `[low, high]`.
pub fn pick_between(rng: &mut dyn RandomSource, low: u32, high: u32) -> u32 {
    debug_assert!(low <= high, "pick_between with inverted bounds");
    let span = (high - low + 1) as f64;
    low + (rng.next() * span) as u32
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = pick_index(rng, i + 1);
        items.swap(i, j);
    }
}
