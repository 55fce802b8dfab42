use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces uniform samples in `[0, 1)`.
///
/// A generator owns its random source. Callers build one per request (see
/// [`crate::SeedSource`]) so no generator state is ever shared across tasks.
#[derive(Debug, Clone)]
pub struct SampleGenerator<R = ChaCha8Rng> {
    rng: R,
}

impl SampleGenerator<ChaCha8Rng> {
    /// Deterministic generator: the same seed always yields the same samples.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws `sample_size` fresh values and tiles them `copies` times.
    ///
    /// The output holds `sample_size * copies` values where position
    /// `i + sample_size * j` repeats position `i`. Only the first block
    /// consumes entropy. `copies == 0` behaves like `1`.
    pub fn generate(&mut self, sample_size: usize, copies: usize) -> Vec<f64> {
        let copies = copies.max(1);
        let mut data = Vec::with_capacity(sample_size.saturating_mul(copies));
        for _ in 0..sample_size {
            data.push(self.rng.gen::<f64>());
        }
        for _ in 1..copies {
            data.extend_from_within(..sample_size);
        }
        data
    }

    #[cfg(test)]
    fn into_rng(self) -> R {
        self.rng
    }
}
