use std::sync::atomic::{AtomicU64, Ordering};

use crate::SampleGenerator;

/// Hands out one seed per request.
///
/// `Entropy` draws every seed from the OS. `Sequence` derives seeds from a
/// fixed base and a counter, so a restarted process replays the same samples
/// for the same request order.
#[derive(Debug)]
pub enum SeedSource {
    Entropy,
    Sequence { base: u64, next: AtomicU64 },
}

impl SeedSource {
    pub fn from_option(seed: Option<u64>) -> Self {
        match seed {
            Some(base) => Self::sequence(base),
            None => Self::Entropy,
        }
    }

    pub fn sequence(base: u64) -> Self {
        Self::Sequence {
            base,
            next: AtomicU64::new(0),
        }
    }

    pub fn next_seed(&self) -> u64 {
        match self {
            Self::Entropy => rand::random(),
            Self::Sequence { base, next } => {
                let n = next.fetch_add(1, Ordering::Relaxed);
                splitmix64(base.wrapping_add(n))
            }
        }
    }

    /// Seeds handed out so far. Always 0 for `Entropy`.
    pub fn issued(&self) -> u64 {
        match self {
            Self::Entropy => 0,
            Self::Sequence { next, .. } => next.load(Ordering::Relaxed),
        }
    }

    pub fn generator(&self) -> SampleGenerator {
        SampleGenerator::seeded(self.next_seed())
    }
}

// Spreads consecutive counters across the seed space.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
