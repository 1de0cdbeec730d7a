//! The race engine. Ties generation, simulation, shaping and storage
//! together for one service instance.
//!
//! PIPELINE (fixed order, per race):
//!   1. Draw this race's RNG stream from the bank (by ordinal).
//!   2. Generate the field.
//!   3. Simulate to the first finisher.
//!   4. Shape into a StoredRace with a fresh time-ordered id.
//!   5. Append to the store.
//!
//! Each race runs to completion before it is persisted; nothing is
//! shared between races except the ordinal counter and the store.

use crate::{
    config::ServerConfig,
    error::SimResult,
    record::{new_race_id, StoredRace},
    request::{RaceRequest, RequestLimits},
    rng::RngBank,
    runner::{generate, SpeedRange},
    simulator::{max_steps, simulate, RaceResult},
    store::RaceStore,
};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RaceEngine {
    speed_range: SpeedRange,
    limits:      RequestLimits,
    rng_bank:    RngBank,
    next_race:   AtomicU64,
    store:       Box<dyn RaceStore>,
}

impl RaceEngine {
    pub fn new(config: &ServerConfig, store: Box<dyn RaceStore>) -> SimResult<Self> {
        config.validate()?;
        let rng_bank = match config.seed {
            Some(seed) => RngBank::new(seed),
            None => RngBank::from_entropy(),
        };
        Ok(Self {
            speed_range: config.speed_range()?,
            limits: config.limits(),
            rng_bank,
            next_race: AtomicU64::new(0),
            store,
        })
    }

    /// Engine with the test config and an in-memory store.
    pub fn build_test(seed: u64) -> SimResult<Self> {
        let config = ServerConfig { seed: Some(seed), ..ServerConfig::default_test() };
        Self::new(&config, Box::new(crate::store::MemoryStore::new()))
    }

    pub fn limits(&self) -> &RequestLimits {
        &self.limits
    }

    pub fn master_seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Generate and simulate one race without persisting it.
    pub fn simulate_only(&self, request: &RaceRequest) -> SimResult<RaceResult> {
        let ordinal = self.next_race.fetch_add(1, Ordering::Relaxed);
        let mut rng = self.rng_bank.for_race(ordinal);
        let runners = generate(request.runner_count, self.speed_range, &mut rng);
        log::debug!(
            "race #{ordinal}: {} runners over {} (at most {} steps)",
            request.runner_count,
            request.distance,
            max_steps(request.distance, self.speed_range.min())
        );
        simulate(runners, request.distance)
    }

    /// Run one race and persist it.
    pub fn run_race(&self, request: &RaceRequest) -> SimResult<StoredRace> {
        let result = self.simulate_only(request)?;
        let race = StoredRace::from_result(new_race_id(), request, result, Utc::now());
        self.store.append(&race)?;
        log::info!(
            "Stored race {} ({} runners, distance {}): winner {} after {} steps",
            race.id,
            race.runner_count,
            race.distance,
            race.winner.id,
            race.elapsed_steps
        );
        Ok(race)
    }

    pub fn list_races(&self) -> SimResult<Vec<StoredRace>> {
        self.store.list_all()
    }

    pub fn get_race(&self, id: &str) -> SimResult<Option<StoredRace>> {
        self.store.find_by_id(id)
    }

    pub fn delete_race(&self, id: &str) -> SimResult<bool> {
        let deleted = self.store.delete_by_id(id)?;
        if deleted {
            log::info!("Deleted race {id}");
        } else {
            log::debug!("Delete of unknown race {id}");
        }
        Ok(deleted)
    }
}
