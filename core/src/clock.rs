//! Race clock: owns the step counter for one simulation.

use crate::types::Step;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceClock {
    pub current_step: Step,
}

impl RaceClock {
    /// A fresh clock sits at step 0, before any movement.
    pub fn new() -> Self {
        Self { current_step: 0 }
    }

    /// Advance one step. Returns the new step number.
    pub fn advance(&mut self) -> Step {
        self.current_step += 1;
        self.current_step
    }
}
