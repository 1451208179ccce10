//! RNG module - random sources for spawn selection
//!
//! The engine asks its source for a block index in `0..=6` every time it
//! creates a piece. Two sources are provided:
//!
//! - [`SimpleRng`]: a seeded LCG for reproducible games
//! - [`FixedSequence`]: cycles through a given list of kinds, for tests and replays
//!
//! Sources are `Clone` so that a simulation clone can own an independent copy;
//! look-ahead never advances the live sequence.

use crate::types::PieceKind;

/// Seed used when none is configured
pub const DEFAULT_SEED: u32 = 42;

/// Supplies spawn shape selection
pub trait RandomSource {
    /// Next block index in `0..=6` (see [`PieceKind::ALL`])
    fn next_block_index(&mut self) -> u8;

    /// Next block as a piece kind
    fn next_kind(&mut self) -> PieceKind {
        let index = self.next_block_index() % PieceKind::ALL.len() as u8;
        PieceKind::ALL[index as usize]
    }
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SimpleRng {
    fn next_block_index(&mut self) -> u8 {
        self.next_range(PieceKind::ALL.len() as u32) as u8
    }
}

/// Deterministic source that repeats a fixed list of kinds
#[derive(Debug, Clone)]
pub struct FixedSequence {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl FixedSequence {
    /// Cycle through `kinds` in order; an empty list yields I pieces
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Always yield the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl RandomSource for FixedSequence {
    fn next_block_index(&mut self) -> u8 {
        if self.kinds.is_empty() {
            return PieceKind::I.index();
        }
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind.index()
    }
}
