use crate::types::RunnerId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Race has no runners")]
    NoRunners,

    #[error("Invalid distance: {0} (must be finite and > 0)")]
    InvalidDistance(f64),

    #[error("Runner {id} has non-positive speed {speed}")]
    NonPositiveSpeed { id: RunnerId, speed: u32 },

    #[error("Invalid speed range [{min}, {max}]")]
    InvalidSpeedRange { min: u32, max: u32 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaceError {
    /// True for errors caused by caller input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::NoRunners
                | Self::InvalidDistance(_)
                | Self::InvalidSpeedRange { .. }
        )
    }
}

pub type SimResult<T> = Result<T, RaceError>;
