//! Discrete-step race simulation with pluggable persistence.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod report;
pub mod request;
pub mod rng;
pub mod runner;
pub mod simulator;
pub mod store;
pub mod types;
