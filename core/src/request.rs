//! Race request validation.
//!
//! RULE: The simulator never sees an unvalidated request. Everything
//! arriving from the outside goes through RaceRequest::parse or
//! RaceRequest::validate first.

use crate::error::{RaceError, SimResult};

/// A validated request to run one race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceRequest {
    pub runner_count: u32,
    pub distance:     f64,
}

/// Upper bounds that keep a single request's work bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestLimits {
    pub max_runners:  u32,
    pub max_distance: f64,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_runners:  1_000,
            max_distance: 100_000.0,
        }
    }
}

impl RaceRequest {
    /// Parse raw (query-string) parameters.
    pub fn parse(
        runner_count: Option<&str>,
        distance: Option<&str>,
        limits: &RequestLimits,
    ) -> SimResult<Self> {
        let runner_count = runner_count
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RaceError::InvalidRequest("runner count is required".into()))?;
        let distance = distance
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RaceError::InvalidRequest("distance is required".into()))?;

        let runner_count: i64 = runner_count.parse().map_err(|_| {
            RaceError::InvalidRequest(format!("runner count '{runner_count}' is not an integer"))
        })?;
        let distance: f64 = distance.parse().map_err(|_| {
            RaceError::InvalidRequest(format!("distance '{distance}' is not a number"))
        })?;

        Self::checked(runner_count, distance, limits)
    }

    /// Validate already-typed values (JSON bodies).
    pub fn validate(runner_count: i64, distance: f64, limits: &RequestLimits) -> SimResult<Self> {
        Self::checked(runner_count, distance, limits)
    }

    fn checked(runner_count: i64, distance: f64, limits: &RequestLimits) -> SimResult<Self> {
        if runner_count <= 0 {
            return Err(RaceError::InvalidRequest(format!(
                "runner count must be > 0, got {runner_count}"
            )));
        }
        if runner_count > i64::from(limits.max_runners) {
            return Err(RaceError::InvalidRequest(format!(
                "runner count {runner_count} exceeds limit {}",
                limits.max_runners
            )));
        }
        if !distance.is_finite() || distance <= 0.0 {
            return Err(RaceError::InvalidRequest(format!(
                "distance must be a finite number > 0, got {distance}"
            )));
        }
        if distance > limits.max_distance {
            return Err(RaceError::InvalidRequest(format!(
                "distance {distance} exceeds limit {}",
                limits.max_distance
            )));
        }
        Ok(Self {
            runner_count: runner_count as u32,
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RequestLimits {
        RequestLimits::default()
    }

    #[test]
    fn parses_valid_parameters() {
        let req = RaceRequest::parse(Some("4"), Some("42.5"), &limits()).unwrap();
        assert_eq!(req, RaceRequest { runner_count: 4, distance: 42.5 });
    }

    #[test]
    fn missing_or_blank_parameters_are_rejected() {
        assert!(RaceRequest::parse(None, Some("10"), &limits()).is_err());
        assert!(RaceRequest::parse(Some("3"), None, &limits()).is_err());
        assert!(RaceRequest::parse(Some("  "), Some("10"), &limits()).is_err());
    }

    #[test]
    fn non_positive_values_are_rejected() {
        for (n, d) in [("0", "10"), ("-2", "10"), ("3", "0"), ("3", "-1.5")] {
            let err = RaceRequest::parse(Some(n), Some(d), &limits()).unwrap_err();
            assert!(err.is_client_error(), "({n}, {d}) should be a client error");
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(RaceRequest::parse(Some("abc"), Some("10"), &limits()).is_err());
        assert!(RaceRequest::parse(Some("2.5"), Some("10"), &limits()).is_err());
        assert!(RaceRequest::parse(Some("2"), Some("far"), &limits()).is_err());
        assert!(RaceRequest::parse(Some("2"), Some("inf"), &limits()).is_err());
        assert!(RaceRequest::parse(Some("2"), Some("NaN"), &limits()).is_err());
    }

    #[test]
    fn limits_are_enforced() {
        let tight = RequestLimits { max_runners: 10, max_distance: 100.0 };
        assert!(RaceRequest::validate(11, 50.0, &tight).is_err());
        assert!(RaceRequest::validate(10, 100.5, &tight).is_err());
        assert!(RaceRequest::validate(10, 100.0, &tight).is_ok());
    }
}
