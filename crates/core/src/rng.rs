//! RNG module - deterministic piece selection
//!
//! Pieces are chosen uniformly at random among the seven kinds, with a
//! single piece of preview. A small LCG keeps every game reproducible from
//! its seed.

use crate::types::PieceKind;

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
    /// Takes the high half of the state; the low bits of an LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

/// Uniform piece generator with a one-piece preview.
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: SimpleRng,
    next: PieceKind,
    seed: u32,
}

impl PieceSource {
    /// Create a new piece source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::pick(&mut rng);
        Self { rng, next, seed }
    }

    fn pick(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = Self::pick(&mut self.rng);
        piece
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
