//! Shared primitive types used across the race simulation.

/// A simulation step. One step = every runner advances once.
pub type Step = u64;

/// 1-based runner identifier, assigned in generation order.
pub type RunnerId = u32;

/// Stable identifier of a persisted race.
pub type RaceId = String;
