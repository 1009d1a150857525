//! Seeded nonce source.

use cyclecheck_kernels::Nonce;
use std::ops::RangeInclusive;

pub const NONCE_RANGE: RangeInclusive<i32> = 1..=100;

/// Draws one nonce per evaluation from a replayable seed.
#[derive(Debug, Clone)]
pub struct NonceSource {
    rng: fastrand::Rng,
    seed: u64,
}

impl NonceSource {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::with_seed(fastrand::u64(..))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn draw(&mut self) -> Nonce {
        Nonce::new(self.rng.i32(NONCE_RANGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let mut nonces = NonceSource::with_seed(3);
        for _ in 0..10_000 {
            assert!(NONCE_RANGE.contains(&nonces.draw().get()));
        }
    }

    #[test]
    fn same_seed_replays_the_same_nonces() {
        let mut first = NonceSource::with_seed(0xC0FFEE);
        let mut second = NonceSource::with_seed(0xC0FFEE);
        let a: Vec<_> = (0..64).map(|_| first.draw()).collect();
        let b: Vec<_> = (0..64).map(|_| second.draw()).collect();
        assert_eq!(a, b);
        assert_eq!(first.seed(), 0xC0FFEE);
    }

    #[test]
    fn both_ends_of_the_range_occur() {
        let mut nonces = NonceSource::with_seed(11);
        let drawn: Vec<i32> = (0..5_000).map(|_| nonces.draw().get()).collect();
        assert!(drawn.contains(&1));
        assert!(drawn.contains(&100));
    }
}
