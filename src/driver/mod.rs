//! Driver loop: input snapshot in, axis readings out
//!
//! [`AxisController`] performs one tick for every configured axis: it applies
//! the global ignore / recenter / toggle bindings, resolves each axis's
//! direction from its chords and advances the axis. [`DriverLoop`] calls it
//! at a fixed cadence and forwards the readings to an [`OutputSink`].

pub mod output;
pub mod runner;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::axis::{Axis, Direction};
use crate::config::KeysConfig;
use crate::input::{direction_for, InputSnapshot};

pub use output::{map_output, AxisReading, ConsoleSink, OutputSink};
pub use runner::{DriverLoop, TickClock};

/// Owns every axis and the global key state of the driver
pub struct AxisController {
    axes: BTreeMap<String, Axis>,
    keys: KeysConfig,
    /// Inactive controllers feed a neutral direction to every axis
    active: bool,
    /// Toggle chord state on the previous tick, for edge detection
    toggle_held: bool,
}

impl AxisController {
    pub fn new(axes: BTreeMap<String, Axis>, keys: KeysConfig) -> Self {
        Self {
            axes,
            keys,
            active: true,
            toggle_held: false,
        }
    }

    /// Run one tick for every axis
    ///
    /// # Arguments
    /// * `snapshot` - Tokens held during this tick
    /// * `elapsed_micros` - Time since the previous tick, in microseconds
    pub fn tick(&mut self, snapshot: InputSnapshot, elapsed_micros: f64) -> Vec<AxisReading> {
        let recenter = self.keys.recenter.is_pressed(&snapshot);
        let ignore = self.keys.ignore.is_pressed(&snapshot);
        let toggle = self.keys.toggle.is_pressed(&snapshot);

        if toggle && !self.toggle_held {
            self.active = !self.active;
            info!("Axis input {}", if self.active { "enabled" } else { "disabled" });
        }
        self.toggle_held = toggle;

        let accept_input = self.active && !ignore && !recenter;

        self.axes
            .iter_mut()
            .map(|(name, axis)| {
                if recenter {
                    axis.recenter();
                }

                let direction = if accept_input {
                    let bindings = axis.bindings();
                    direction_for(&bindings.positive, &bindings.negative, &snapshot)
                } else {
                    Direction::Neutral
                };

                axis.apply(direction, elapsed_micros);

                if direction != Direction::Neutral {
                    debug!(
                        axis = name.as_str(),
                        %direction,
                        value = axis.value(),
                        region = axis.active_region(),
                        "Axis driven"
                    );
                }

                AxisReading::from_axis(name, axis)
            })
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn axes(&self) -> &BTreeMap<String, Axis> {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    const CONFIG: &str = r#"
keys:
  ignore: ["LAlt"]
  recenter: ["LControl+C"]
  toggle: ["F12"]

axis:
  roll:
    positive: ["D"]
    negative: ["A"]
    regions:
      "[-1, 0)": { positive: 1.0, neutral: 0.0, negative: -1.0 }
      "[0, 1]": { positive: 1.0, neutral: 0.0, negative: -1.0 }
  pitch:
    positive: ["S"]
    negative: ["W"]
    regions:
      "[-1, 1]": { positive: 2.0, neutral: 0.0, negative: -2.0 }
"#;

    fn controller() -> AxisController {
        let config = AppConfig::from_yaml(CONFIG).unwrap();
        AxisController::new(config.build_axes().unwrap(), config.keys.clone())
    }

    fn held(tokens: &[&str]) -> InputSnapshot {
        tokens.iter().copied().collect()
    }

    fn value_of(controller: &AxisController, name: &str) -> f64 {
        controller.axis(name).unwrap().value()
    }

    #[test]
    fn test_axes_are_independent() {
        let mut controller = controller();
        let readings = controller.tick(held(&["D"]), 250_000.0);

        assert_eq!(readings.len(), 2);
        assert!((value_of(&controller, "roll") - 0.25).abs() < 1e-9);
        assert_eq!(value_of(&controller, "pitch"), 0.0);

        controller.tick(held(&["W"]), 250_000.0);
        assert!((value_of(&controller, "roll") - 0.25).abs() < 1e-9);
        assert!((value_of(&controller, "pitch") + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut controller = controller();
        controller.tick(held(&["A", "D"]), 500_000.0);
        assert_eq!(value_of(&controller, "roll"), 0.0);
    }

    #[test]
    fn test_ignore_forces_neutral() {
        let mut controller = controller();
        controller.tick(held(&["D", "LAlt"]), 500_000.0);
        assert_eq!(value_of(&controller, "roll"), 0.0);
    }

    #[test]
    fn test_recenter_resets_every_axis() {
        let mut controller = controller();
        controller.tick(held(&["D", "S"]), 250_000.0);
        assert!(value_of(&controller, "roll") > 0.0);
        assert!(value_of(&controller, "pitch") > 0.0);

        controller.tick(held(&["D", "LControl", "C"]), 250_000.0);
        assert_eq!(value_of(&controller, "roll"), 0.0);
        assert_eq!(value_of(&controller, "pitch"), 0.0);
    }

    #[test]
    fn test_toggle_on_rising_edge() {
        let mut controller = controller();
        assert!(controller.is_active());

        controller.tick(held(&["F12"]), 10_000.0);
        assert!(!controller.is_active());

        // Holding does not flip again
        controller.tick(held(&["F12", "D"]), 250_000.0);
        assert!(!controller.is_active());
        assert_eq!(value_of(&controller, "roll"), 0.0);

        controller.tick(held(&[]), 10_000.0);
        controller.tick(held(&["F12"]), 10_000.0);
        assert!(controller.is_active());

        controller.tick(held(&["D"]), 250_000.0);
        assert!((value_of(&controller, "roll") - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_readings_carry_output() {
        let mut controller = controller();
        let readings = controller.tick(held(&["D"]), 1_000_000.0);
        let roll = readings.iter().find(|r| r.name == "roll").unwrap();

        assert_eq!(roll.value, 1.0);
        assert_eq!(roll.fraction, 1.0);
        assert_eq!(roll.output, 32768);
    }
}
