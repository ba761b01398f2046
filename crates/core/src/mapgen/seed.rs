//! Seeded pseudo-random stream threaded through every generation stage.
//!
//! Every draw consumes exactly one 32-bit word, including degenerate ranges,
//! so the output for a seed depends only on the order of calls.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

const FLOAT_SCALE: f32 = 1.0 / 16_777_216.0;

pub(super) struct SeedStream {
    rng: ChaCha8Rng,
}

impl SeedStream {
    pub(super) fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform integer in `[min, max)`. Returns `min` when the range is empty.
    pub(super) fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        let word = self.rng.next_u32();
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min)) as u64;
        let offset = (u64::from(word) * span) >> 32;
        (i64::from(min) + offset as i64) as i32
    }

    /// Uniform index in `[min, max)`. Returns `min` when the range is empty.
    pub(super) fn range_usize(&mut self, min: usize, max: usize) -> usize {
        let word = self.rng.next_u32();
        if max <= min {
            return min;
        }
        let span = (max - min) as u64;
        min + ((u64::from(word) * span) >> 32) as usize
    }

    /// Uniform float in `[0, 1)` with 24 bits of precision.
    pub(super) fn value(&mut self) -> f32 {
        (self.rng.next_u32() >> 8) as f32 * FLOAT_SCALE
    }

    pub(super) fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.value()
    }
}
