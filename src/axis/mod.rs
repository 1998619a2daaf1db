//! Piecewise-rate axis driven by digital input
//!
//! An [`Axis`] splits its domain `[min_input, max_input]` into adjacent
//! [`Region`]s. Each tick the active region's rate for the current
//! [`Direction`] moves the value, the result is clamped to the active region,
//! and the active region steps at most one neighbour towards where the value
//! wanted to go.
//!
//! ```text
//!   min_input                                        max_input
//!   [---- region 0 ----)[---- region 1 ----](-- region 2 --]
//!                        ^ value clamped here until the index moves
//! ```

pub mod interval;
pub mod region;

use std::time::Duration;

use tracing::trace;

use crate::error::{AxisError, AxisResult, ConfigRule};
use crate::input::ChordSet;

pub use interval::{approx_eq, Interval, BOUNDARY_EPSILON};
pub use region::{Direction, Region};

/// Domain and output range of an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_input: f64,
    pub max_input: f64,
    /// Output device range, stored for the output layer
    pub min_output: i64,
    pub max_output: i64,
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            min_input: -1.0,
            max_input: 1.0,
            min_output: 0,
            max_output: 32768,
        }
    }
}

/// Key chords that drive an axis, resolved outside the axis itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisBindings {
    pub positive: ChordSet,
    pub negative: ChordSet,
}

/// Digital-input axis with a validated region partition
#[derive(Debug, Clone)]
pub struct Axis {
    regions: Vec<Region>,
    bounds: AxisBounds,
    default_value: f64,
    bindings: AxisBindings,
    value: f64,
    active_region: usize,
}

impl Axis {
    /// Build an axis from an unordered set of regions
    ///
    /// Regions are sorted and must partition `[min_input, max_input]` exactly:
    /// closed at both outer ends, and every shared boundary closed on exactly
    /// one side.
    pub fn new(
        mut regions: Vec<Region>,
        bounds: AxisBounds,
        default_value: f64,
        bindings: AxisBindings,
    ) -> AxisResult<Self> {
        let AxisBounds {
            min_input,
            max_input,
            ..
        } = bounds;

        if regions.is_empty() {
            return Err(AxisError::config(
                ConfigRule::EmptyPartition,
                "at least one region is required",
            ));
        }

        if !(min_input < max_input) {
            return Err(AxisError::config(
                ConfigRule::DegenerateDomain,
                format!("min_input {} must be below max_input {}", min_input, max_input),
            ));
        }

        // Tolerant ties make the order non-transitive for near-equal starts;
        // that only happens in partitions the checks below reject anyway
        regions.sort_by(|a, b| a.interval().compare(b.interval()));

        let first = regions[0].interval();
        if !approx_eq(first.start(), min_input) || !first.start_inclusive() {
            return Err(AxisError::config(
                ConfigRule::MissingLowerAnchor,
                format!("first region must be [{}, ..., was {}", min_input, first),
            ));
        }

        let last = regions[regions.len() - 1].interval();
        if !approx_eq(last.end(), max_input) || !last.end_inclusive() {
            return Err(AxisError::config(
                ConfigRule::MissingUpperAnchor,
                format!("last region must be ..., {}], was {}", max_input, last),
            ));
        }

        for pair in regions.windows(2) {
            let (prev, next) = (pair[0].interval(), pair[1].interval());

            if !approx_eq(prev.end(), next.start()) {
                let rule = if prev.end() < next.start() {
                    ConfigRule::Gap
                } else {
                    ConfigRule::Overlap
                };
                return Err(AxisError::config(
                    rule,
                    format!("region {} must start where {} ends", next, prev),
                ));
            }

            if prev.end_inclusive() == next.start_inclusive() {
                return Err(AxisError::config(
                    ConfigRule::BoundaryInclusivity,
                    format!(
                        "shared boundary of {} and {} must be open on exactly one side",
                        prev, next
                    ),
                ));
            }
        }

        if !(min_input..=max_input).contains(&default_value) {
            return Err(AxisError::config(
                ConfigRule::DefaultOutOfRange,
                format!(
                    "default value {} must be between {} and {}",
                    default_value, min_input, max_input
                ),
            ));
        }

        // On a shared boundary the later region wins
        let active_region = regions
            .iter()
            .rposition(|r| r.interval().contains(default_value))
            .unwrap_or(0);

        Ok(Self {
            regions,
            bounds,
            default_value,
            bindings,
            value: default_value,
            active_region,
        })
    }

    /// Advance the axis by one tick
    ///
    /// `elapsed_micros` is the time since the previous tick in microseconds.
    /// The value never leaves the region that was active when the call
    /// started, and the active region moves by at most one step.
    pub fn apply(&mut self, direction: Direction, elapsed_micros: f64) {
        let elapsed = if elapsed_micros.is_finite() {
            elapsed_micros
        } else {
            0.0
        };

        let last = self.regions.len() - 1;
        let region = &self.regions[self.active_region];
        let interval = *region.interval();

        let candidate = self.value + region.rate_for(direction) * elapsed;
        self.value = interval.clamp(candidate);

        if interval.is_below(candidate) && self.active_region > 0 {
            self.active_region -= 1;
            trace!(
                "Region {} -> {} (candidate {} below {})",
                self.active_region + 1,
                self.active_region,
                candidate,
                interval
            );
        } else if interval.is_above(candidate) && self.active_region < last {
            self.active_region += 1;
            trace!(
                "Region {} -> {} (candidate {} above {})",
                self.active_region - 1,
                self.active_region,
                candidate,
                interval
            );
        }
    }

    /// Advance the axis by one tick measured as a [`Duration`]
    pub fn apply_elapsed(&mut self, direction: Direction, elapsed: Duration) {
        self.apply(direction, elapsed.as_secs_f64() * 1_000_000.0);
    }

    /// Force the value to zero
    ///
    /// The active region is left alone; if zero lies outside it, the next
    /// ticks walk the index back one region at a time.
    pub fn recenter(&mut self) {
        self.value = 0.0;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value rescaled so `min_input` maps to 0 and `max_input` to 1
    pub fn fraction_value(&self) -> f64 {
        (self.value - self.bounds.min_input) / (self.bounds.max_input - self.bounds.min_input)
    }

    pub fn active_region(&self) -> usize {
        self.active_region
    }

    /// Regions in sorted order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn bindings(&self) -> &AxisBindings {
        &self.bindings
    }
}
