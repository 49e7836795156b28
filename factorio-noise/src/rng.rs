//! Factorio's three-lane xorshift generator
//!
//! Each lane is an independent 32-bit xorshift-style register; the lanes
//! advance together and are XORed into a single output. All arithmetic is
//! unsigned: the right shifts are logical and every left shift truncates to
//! 32 bits.

/// Seeds below this value are raised to it before use.
pub const MIN_SEED: u32 = 341;

/// `2^-32`, the literal multiplier used to turn a draw into a float.
const FLOAT_SCALE: f64 = 2.328_306_436_538_696_3e-10;

/// Per-lane shift parameters: (left, right, masked left, retain mask).
const LANES: [(u32, u32, u32, u32); 3] = [
    (13, 19, 12, 0xFFFF_FFFE),
    (2, 25, 4, 0xFFFF_FFF8),
    (3, 11, 17, 0xFFFF_FFF0),
];

/// Combined shift-register generator used by Factorio's noise setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomGenerator {
    lanes: [u32; 3],
}

impl RandomGenerator {
    /// Create a generator with all three lanes set to `max(seed, 341)`.
    pub fn for_seed(seed: u32) -> Self {
        let seed = seed.max(MIN_SEED);
        Self { lanes: [seed; 3] }
    }

    /// Like [`for_seed`](Self::for_seed) for a signed seed; anything at or
    /// below 341 (negatives included) behaves as 341, and seeds past
    /// `u32::MAX` are clamped to it.
    pub fn for_seed_i64(seed: i64) -> Self {
        let seed = seed.clamp(i64::from(MIN_SEED), i64::from(u32::MAX));
        Self::for_seed(seed as u32)
    }

    /// Current lane state, lane 1 first.
    pub fn lanes(&self) -> [u32; 3] {
        self.lanes
    }

    /// Advance all lanes and return their XOR.
    pub fn next_int(&mut self) -> u32 {
        let mut result = 0;
        for (lane, &(left, right, masked_left, retain)) in self.lanes.iter_mut().zip(&LANES) {
            let a = ((*lane << left) ^ *lane) >> right;
            *lane = ((*lane & retain) << masked_left) ^ a;
            result ^= *lane;
        }
        result
    }

    /// Draw reduced into `[min, max)` by plain remainder.
    ///
    /// The reduction is biased for ranges that are not a power of two; that
    /// bias is part of the reproduced behaviour.
    ///
    /// # Panics
    ///
    /// Panics if `min == max`.
    pub fn next_int_between(&mut self, min: i64, max: i64) -> i64 {
        i64::from(self.next_int()) % (max - min) + min
    }

    /// Draw scaled into `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.next_int()) * FLOAT_SCALE
    }
}

/// Fisher-Yates shuffle driven by `rng`, walking from the last index down to 1.
pub fn random_shuffle<T>(items: &mut [T], rng: &mut RandomGenerator) {
    for i in (1..items.len()).rev() {
        let j = rng.next_int_between(0, i as i64 + 1) as usize;
        items.swap(i, j);
    }
}
