//! Process-lifetime pseudo-random index selection.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A pseudo-random generator seeded once and shared by every request.
///
/// Each pick advances the same sequence; nothing is reseeded per request.
#[derive(Debug)]
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    /// Seed from the operating system's entropy source.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic sequence, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// A uniformly distributed index in `[0, len)`, or `None` when `len` is 0.
    pub fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // A panic while holding the lock cannot leave a StdRng half-updated.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(rng.gen_range(0..len))
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}
