//! Runner records and the race generator.

use crate::{
    error::{RaceError, SimResult},
    rng::RaceRng,
    types::RunnerId,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SPEED: u32 = 5;
pub const DEFAULT_MAX_SPEED: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Runner {
    pub id:       RunnerId,
    pub speed:    u32,
    /// Distance covered so far. Only the simulator moves it.
    pub position: f64,
}

impl Runner {
    pub fn new(id: RunnerId, speed: u32) -> Self {
        Self { id, speed, position: 0.0 }
    }
}

/// Inclusive integer speed range. The lower bound is at least 1 so every
/// runner moves on every step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeedRange {
    min: u32,
    max: u32,
}

impl SpeedRange {
    pub fn new(min: u32, max: u32) -> SimResult<Self> {
        if min == 0 || min > max {
            return Err(RaceError::InvalidSpeedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 { self.min }
    pub fn max(&self) -> u32 { self.max }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_SPEED, max: DEFAULT_MAX_SPEED }
    }
}

/// Build `n` runners with ids 1..=n and independent uniform speeds.
///
/// `n` is not validated here; zero yields an empty field, which the
/// simulator rejects.
pub fn generate(n: u32, range: SpeedRange, rng: &mut RaceRng) -> Vec<Runner> {
    let runners: Vec<Runner> = (1..=n)
        .map(|id| Runner::new(id, rng.next_in_range(range.min, range.max)))
        .collect();
    log::trace!("generated {} runners from rng stream '{}'", runners.len(), rng.name);
    runners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_generation_order() {
        let mut rng = RaceRng::from_seed(11);
        let runners = generate(6, SpeedRange::default(), &mut rng);
        let ids: Vec<RunnerId> = runners.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn runners_start_at_zero_within_range() {
        let mut rng = RaceRng::from_seed(12);
        for r in generate(500, SpeedRange::default(), &mut rng) {
            assert_eq!(r.position, 0.0);
            assert!((5..=15).contains(&r.speed), "speed {} out of range", r.speed);
        }
    }

    #[test]
    fn zero_runners_yields_empty_field() {
        let mut rng = RaceRng::from_seed(13);
        assert!(generate(0, SpeedRange::default(), &mut rng).is_empty());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate(20, SpeedRange::default(), &mut RaceRng::from_seed(99));
        let b = generate(20, SpeedRange::default(), &mut RaceRng::from_seed(99));
        assert_eq!(a, b);
    }

    #[test]
    fn speed_range_rejects_zero_and_inverted_bounds() {
        assert!(matches!(
            SpeedRange::new(0, 10),
            Err(RaceError::InvalidSpeedRange { min: 0, max: 10 })
        ));
        assert!(SpeedRange::new(8, 4).is_err());
        let r = SpeedRange::new(3, 3).unwrap();
        assert_eq!((r.min(), r.max()), (3, 3));
    }
}
