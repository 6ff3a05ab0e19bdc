//! Deterministic random number generation.
//!
//! The only randomness in the simulation is the one-time shuffle of monster
//! patrol rings, and replays must be stable, so this is a tiny PCG rather
//! than a dependency on a seeded external RNG.

/// PCG-XSH-RR generator with 64-bit state and 32-bit output.
///
/// Same seed, same sequence — always.
#[derive(Clone, Copy, Debug)]
pub struct Pcg {
    state: u64,
}

impl Pcg {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        let state = self.state;
        self.state = state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);

        // PCG-XSH-RR output permutation: xorshift high bits, random rotate.
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `[0, bound)`. Returns 0 for a zero bound.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Fisher-Yates shuffle driven by this generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_bounded(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}
