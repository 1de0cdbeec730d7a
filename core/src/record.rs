//! Persisted race records.

use crate::{
    request::RaceRequest,
    runner::Runner,
    simulator::RaceResult,
    types::{RaceId, Step},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredRace {
    pub id:            RaceId,
    pub runner_count:  u32,
    pub distance:      f64,
    pub elapsed_steps: Step,
    pub runners:       Vec<Runner>,
    pub winner:        Runner,
    pub created_at:    DateTime<Utc>,
}

impl StoredRace {
    pub fn from_result(
        id: RaceId,
        request: &RaceRequest,
        result: RaceResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            runner_count:  request.runner_count,
            distance:      request.distance,
            elapsed_steps: result.elapsed_steps,
            runners:       result.runners,
            winner:        result.winner,
            created_at,
        }
    }

    /// The simulation outcome without the request metadata.
    pub fn result(&self) -> RaceResult {
        RaceResult {
            elapsed_steps: self.elapsed_steps,
            runners:       self.runners.clone(),
            winner:        self.winner.clone(),
        }
    }
}

/// New time-ordered race id (UUID v7).
pub fn new_race_id() -> RaceId {
    Uuid::now_v7().to_string()
}
