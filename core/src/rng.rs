//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call a platform RNG directly.
//! All speed draws flow through RaceRng instances derived from the
//! engine's master seed.
//!
//! Each race gets its own stream, seeded from (master_seed, race ordinal).
//! This means:
//!   - Replaying the same request sequence under the same seed
//!     reproduces every race.
//!   - A race's stream is fully reproducible in isolation.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single race.
pub struct RaceRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl RaceRng {
    /// Create a race RNG from the master seed and a stream index.
    pub fn new(master_seed: u64, stream: u64) -> Self {
        let derived_seed = master_seed ^ (stream.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self::from_seed(derived_seed)
    }

    /// Seed a stream directly. Used by tests and one-off simulations.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u32 uniformly in [min, max], both ends inclusive.
    pub fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        assert!(min <= max, "min must be <= max");
        self.inner.gen_range(min..=max)
    }
}

/// Hands out per-race RNG streams for one engine.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Unseeded bank. The master seed is the only value taken from
    /// platform entropy; it is logged so a run can be replayed.
    pub fn from_entropy() -> Self {
        let master_seed = rand::random::<u64>();
        log::info!("RNG bank seeded from entropy: seed={master_seed}");
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_race(&self, ordinal: u64) -> RaceRng {
        RaceRng::new(self.master_seed, ordinal).with_name("speeds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RaceRng::new(42, 3);
        let mut b = RaceRng::new(42, 3);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn streams_differ_by_ordinal() {
        let bank = RngBank::new(7);
        let mut a = bank.for_race(0);
        let mut b = bank.for_race(1);
        let draws_a: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let draws_b: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let mut rng = RaceRng::from_seed(0xABCD);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2_000 {
            let v = rng.next_in_range(5, 15);
            assert!((5..=15).contains(&v), "draw {v} out of range");
            seen_min |= v == 5;
            seen_max |= v == 15;
        }
        assert!(seen_min && seen_max, "both endpoints should be reachable");
    }

    #[test]
    fn degenerate_range_returns_the_single_value() {
        let mut rng = RaceRng::from_seed(1);
        assert_eq!(rng.next_in_range(9, 9), 9);
    }
}
