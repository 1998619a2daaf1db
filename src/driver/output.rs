//! Axis readings and the sinks they are published to

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::axis::{Axis, AxisBounds};

/// State of one axis after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct AxisReading {
    pub name: String,
    pub value: f64,
    /// Value rescaled to 0..1 over the axis domain
    pub fraction: f64,
    pub region: usize,
    /// Value mapped into the axis output range
    pub output: i64,
}

impl AxisReading {
    pub fn from_axis(name: &str, axis: &Axis) -> Self {
        Self {
            name: name.to_string(),
            value: axis.value(),
            fraction: axis.fraction_value(),
            region: axis.active_region(),
            output: map_output(axis.value(), axis.bounds()),
        }
    }
}

/// Map an axis value into the output range as `center + radius * value`
///
/// `center` and `radius` are the midpoint and half-width of the output
/// bounds, so a value of -1 lands on `min_output` and 1 on `max_output`
/// whatever the input domain is. The result is truncated towards zero and
/// clamped to the output bounds.
pub fn map_output(value: f64, bounds: &AxisBounds) -> i64 {
    let (min, max) = (bounds.min_output, bounds.max_output);
    let center = (min + max) as f64 / 2.0;
    let radius = (max - min) as f64 / 2.0;
    let mapped = center + radius * value;
    (mapped.trunc() as i64).clamp(min, max)
}

/// Receives the readings of every tick
pub trait OutputSink {
    fn publish(&mut self, readings: &[AxisReading]) -> Result<()>;
}

/// Logs readings whose output changed since the previous tick
#[derive(Debug, Default)]
pub struct ConsoleSink {
    last_output: HashMap<String, i64>,
    published: u64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks published so far
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl OutputSink for ConsoleSink {
    fn publish(&mut self, readings: &[AxisReading]) -> Result<()> {
        self.published += 1;

        for reading in readings {
            let previous = self.last_output.insert(reading.name.clone(), reading.output);
            if previous == Some(reading.output) {
                continue;
            }

            info!(
                "🎮 {:<10} value {:>7.3}  fraction {:>5.3}  region {}  output {}",
                reading.name, reading.value, reading.fraction, reading.region, reading.output
            );
            debug!(
                axis = reading.name.as_str(),
                value = reading.value,
                output = reading.output,
                tick = self.published,
                "Axis output changed"
            );
        }

        Ok(())
    }
}
