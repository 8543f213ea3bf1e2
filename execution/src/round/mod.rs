//! Round execution module.
//!
//! The pieces the round engine is assembled from:
//! - Betting ledger
//! - Chase plan and tick timing
//! - Payout resolution
//! - Double-up sub-game

pub mod chase;
pub mod double_up;
#[cfg(test)]
mod integration_tests;
pub mod ledger;
pub mod payout;

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use rand::Rng;

/// Uniform integer source consumed by the engine.
///
/// Bounds are inclusive. Every draw is independent of the previous ones.
pub trait RandomSource {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).next_in_range(low, high)
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }
}

const RNG_NAMESPACE: &[u8] = b"_XIAOMALI_ROUND";

/// Deterministic random number generator built on a SHA256 hash chain.
///
/// Two generators created from the same seed produce the same draws, which
/// lets a whole session be replayed.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(RNG_NAMESPACE);
        hasher.update(&seed.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    pub fn next_u32(&mut self) -> u32 {
        u32::from_be_bytes([
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
        ])
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Rejection sampling keeps the distribution unbiased
        let limit = u32::MAX - (u32::MAX % max);
        loop {
            let value = self.next_u32();
            if value < limit {
                return value % max;
            }
        }
    }
}

impl RandomSource for GameRng {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = high - low;
        if span == u32::MAX {
            return self.next_u32();
        }
        low + self.next_bounded(span + 1)
    }
}
