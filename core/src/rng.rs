//! Deterministic random number generation.
//!
//! RULE: Sampling never touches a platform or thread-local RNG.
//! Every shuffle draws from a SamplerRng handed in by the caller, so
//! tests pin the outcome with a seed and the runner can replay a session.
//!
//! Each request gets its own stream, seeded from
//! (master_seed XOR mixed request_index). Composing request N never
//! perturbs the stream of request N+1.

use rand::{seq::SliceRandom, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG for a single composition request.
pub struct SamplerRng {
    inner: Pcg64Mcg,
}

impl SamplerRng {
    pub fn seeded(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Seed from OS entropy. Only the runner uses this, when no seed is given.
    pub fn from_entropy() -> Self {
        Self { inner: Pcg64Mcg::from_entropy() }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform in-place shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// Per-request RNG streams for one runner session.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_request(&self, request_index: u64) -> SamplerRng {
        let derived_seed = self.master_seed ^ request_index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        SamplerRng::seeded(derived_seed)
    }
}
