//! RNG module - seeded randomness for board generation, refills and shuffles
//!
//! The engine draws every random decision through [`RandomSource`], so a game is
//! fully reproducible from its seed. [`SimpleRng`] is the default source; tests can
//! substitute a scripted one.

use fruit_match_types::Symbol;

/// Source of uniform random draws.
pub trait RandomSource {
    /// Generate random value in range [0, max). `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32;

    /// Pick one symbol uniformly from `alphabet`.
    fn pick_symbol(&mut self, alphabet: &[Symbol]) -> Symbol {
        alphabet[self.next_range(alphabet.len() as u32) as usize]
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
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
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 8) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
