//! The race simulator.
//!
//! STEP ORDER (fixed, never reordered):
//!   1. Advance the clock by one step.
//!   2. Move every runner by its speed, in generation order.
//!   3. If nobody has won yet, the first runner in generation order at or
//!      past the distance wins. Lowest id breaks same-step ties; overshoot
//!      margin is ignored.
//!   4. Stop as soon as a winner exists.
//!
//! All runners move together, so losers' final positions correspond to
//! the same elapsed step count as the winner's.

use crate::{
    clock::RaceClock,
    error::{RaceError, SimResult},
    runner::Runner,
    types::{RunnerId, Step},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub elapsed_steps: Step,
    /// Final state of every runner, in generation order.
    pub runners:       Vec<Runner>,
    pub winner:        Runner,
}

impl RaceResult {
    pub fn winner_id(&self) -> RunnerId {
        self.winner.id
    }
}

/// Run the race to its first finisher.
///
/// Rejects an empty field, a non-finite or non-positive distance, and
/// zero-speed runners; any of those would make the loop unbounded or
/// the result meaningless.
pub fn simulate(mut runners: Vec<Runner>, distance: f64) -> SimResult<RaceResult> {
    if runners.is_empty() {
        return Err(RaceError::NoRunners);
    }
    if !distance.is_finite() || distance <= 0.0 {
        return Err(RaceError::InvalidDistance(distance));
    }
    if let Some(r) = runners.iter().find(|r| r.speed == 0) {
        return Err(RaceError::NonPositiveSpeed { id: r.id, speed: r.speed });
    }

    let mut clock = RaceClock::new();
    let winner_idx = loop {
        clock.advance();
        for runner in runners.iter_mut() {
            runner.position += f64::from(runner.speed);
        }
        if let Some(idx) = runners.iter().position(|r| r.position >= distance) {
            break idx;
        }
    };

    let winner = runners[winner_idx].clone();
    log::debug!(
        "race finished: steps={} runners={} winner={} speed={} position={:.2}",
        clock.current_step,
        runners.len(),
        winner.id,
        winner.speed,
        winner.position
    );

    Ok(RaceResult {
        elapsed_steps: clock.current_step,
        runners,
        winner,
    })
}

/// Upper bound on the steps any race over `distance` can take when the
/// slowest possible runner has `min_speed`.
pub fn max_steps(distance: f64, min_speed: u32) -> Step {
    (distance / f64::from(min_speed.max(1))).ceil() as Step
}
