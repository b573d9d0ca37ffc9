//! The single deterministic random stream threaded through generation.
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;

use crate::constants::ROUTE_STREAM_TAG;

/// Draw-counting wrapper around a portable ChaCha stream.
///
/// Every generator call takes `&mut RouteRng`; the order in which draws are
/// taken is part of the reproducibility contract, so nothing else may hold a
/// second stream for the same run.
#[derive(Debug, Clone)]
pub struct RouteRng {
    rng: ChaCha8Rng,
    draws: u64,
}

impl RouteRng {
    /// Construct the route stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, ROUTE_STREAM_TAG)),
            draws: 0,
        }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform index in `[0, upper)`. Spaces of size 0 or 1 consume no draw.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        let bound = u32::try_from(upper).unwrap_or(u32::MAX);
        self.gen_range(0..bound) as usize
    }

    /// Uniform value in `[low, high]`. A collapsed range consumes no draw.
    pub fn inclusive(&mut self, low: usize, high: usize) -> usize {
        if low >= high {
            return low;
        }
        low + self.below(high - low + 1)
    }
}

impl RngCore for RouteRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so the fallback is never taken.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
