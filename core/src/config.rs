use crate::{
    error::{RaceError, SimResult},
    request::RequestLimits,
    runner::{SpeedRange, DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_JSON_PATH: &str = "races.json";

/// Which backing store holds persisted races.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    Memory,
    /// Whole collection as a single JSON array file.
    JsonFile { path: String },
    /// SQLite database file; ":memory:" for a private in-memory db.
    Sqlite { path: String },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::JsonFile { path: DEFAULT_JSON_PATH.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr:    String,
    pub min_speed:    u32,
    pub max_speed:    u32,
    pub max_runners:  u32,
    pub max_distance: f64,
    /// Master seed for speed draws. None = seed from entropy at startup.
    pub seed:         Option<u64>,
    pub store:        StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = RequestLimits::default();
        Self {
            bind_addr:    DEFAULT_BIND_ADDR.into(),
            min_speed:    DEFAULT_MIN_SPEED,
            max_speed:    DEFAULT_MAX_SPEED,
            max_runners:  limits.max_runners,
            max_distance: limits.max_distance,
            seed:         None,
            store:        StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ServerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a fixed seed and in-memory storage for tests.
    pub fn default_test() -> Self {
        Self {
            seed: Some(0x5EED),
            store: StoreConfig::Memory,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        self.speed_range()?;
        if self.max_runners == 0 {
            return Err(RaceError::InvalidRequest("max_runners must be > 0".into()));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(RaceError::InvalidRequest(
                "max_distance must be a finite number > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn speed_range(&self) -> SimResult<SpeedRange> {
        SpeedRange::new(self.min_speed, self.max_speed)
    }

    pub fn limits(&self) -> RequestLimits {
        RequestLimits {
            max_runners:  self.max_runners,
            max_distance: self.max_distance,
        }
    }
}
