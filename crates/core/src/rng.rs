//! RNG module - shape selection sources
//!
//! Piece kinds are chosen uniformly over the catalog. The choice goes through
//! the [`ShapeSource`] trait so tests can script the exact sequence of shapes,
//! while the game itself uses a seeded LCG for reproducible sessions.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of shape choices.
///
/// `pick(count)` must return an index in `0..count`; `count` is never zero.
pub trait ShapeSource {
    fn pick(&mut self, count: usize) -> usize;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the system clock
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG have very
    /// short periods (bit 0 simply alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (reusable as a seed to replay the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn pick(&mut self, count: usize) -> usize {
        self.next_range(count as u32) as usize
    }
}

/// Deterministic source that replays a fixed list of picks, cycling forever.
///
/// Picks are reduced modulo `count`, so scripts written against one catalog
/// stay in range for a smaller one.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        let mut picks = picks.into();
        if picks.is_empty() {
            picks.push(0);
        }
        Self { picks, next: 0 }
    }

    /// Always pick the same catalog index
    pub fn repeat(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl ShapeSource for ScriptedSource {
    fn pick(&mut self, count: usize) -> usize {
        let pick = self.picks[self.next % self.picks.len()];
        self.next = self.next.wrapping_add(1);
        pick % count
    }
}
