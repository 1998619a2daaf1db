//! Velocity profile bound to one interval of an axis

use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::error::{AxisError, AxisResult};

/// Microseconds per second; rates are stored per microsecond
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Direction an axis is being driven during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Neutral => write!(f, "neutral"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}

/// Interval of the axis domain with one rate per direction
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    interval: Interval,
    positive: f64,
    neutral: f64,
    negative: f64,
}

impl Region {
    /// Create a region from rates in domain units per second
    ///
    /// Rates are stored per microsecond so they can be multiplied by the
    /// driver's elapsed time directly.
    pub fn new(interval: Interval, positive: f64, neutral: f64, negative: f64) -> AxisResult<Self> {
        for (name, rate) in [("positive", positive), ("neutral", neutral), ("negative", negative)] {
            if !rate.is_finite() {
                return Err(AxisError::validation(format!(
                    "{} rate of region {} must be finite, got {}",
                    name, interval, rate
                )));
            }
        }

        Ok(Self {
            interval,
            positive: positive / MICROS_PER_SECOND,
            neutral: neutral / MICROS_PER_SECOND,
            negative: negative / MICROS_PER_SECOND,
        })
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Rate in domain units per microsecond for `direction`
    pub fn rate_for(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Positive => self.positive,
            Direction::Neutral => self.neutral,
            Direction::Negative => self.negative,
        }
    }

    /// Rate in domain units per second for `direction`
    pub fn rate_per_second(&self, direction: Direction) -> f64 {
        self.rate_for(direction) * MICROS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_scaled_to_microseconds() {
        let region = Region::new("[0, 1]".parse().unwrap(), 2.0, 0.0, -4.0).unwrap();

        assert!((region.rate_for(Direction::Positive) - 2e-6).abs() < 1e-15);
        assert_eq!(region.rate_for(Direction::Neutral), 0.0);
        assert!((region.rate_for(Direction::Negative) + 4e-6).abs() < 1e-15);

        // One second worth of microseconds moves by the configured rate
        assert!((region.rate_for(Direction::Positive) * 1_000_000.0 - 2.0).abs() < 1e-9);
        assert!((region.rate_per_second(Direction::Negative) + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let interval: Interval = "[0, 1]".parse().unwrap();
        assert!(Region::new(interval, f64::INFINITY, 0.0, 0.0).is_err());
        assert!(Region::new(interval, 0.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        let direction: Direction = serde_yaml::from_str("negative").unwrap();
        assert_eq!(direction, Direction::Negative);
        assert_eq!(Direction::default(), Direction::Neutral);
    }
}
