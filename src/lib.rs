//! keyramp - analog joystick axes from digital key chords
//!
//! Held key chords resolve to a [`Direction`] each tick; every [`Axis`] ramps
//! its value through a partition of rate [`Region`]s and the driver maps the
//! result into an output range.

pub mod axis;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;

pub use axis::{Axis, AxisBindings, AxisBounds, Direction, Interval, Region};
pub use error::{AxisError, AxisResult, ConfigRule};
