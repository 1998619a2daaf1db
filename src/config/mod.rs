//! Configuration management for keyramp
//!
//! Handles loading, parsing and validating the YAML configuration file, and
//! turning the per-axis sections into validated [`Axis`] instances.
//!
//! ```yaml
//! keys:
//!   recenter: ["LControl+C"]
//!   toggle: ["F12"]
//! axis:
//!   roll:
//!     positive: ["D"]
//!     negative: ["A"]
//!     regions:
//!       "[-1, 0)": { positive: 1.0, neutral: 0.5, negative: -1.0 }
//!       "[0, 1]":  { positive: 1.0, neutral: -0.5, negative: -1.0 }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tokio::fs;
use tracing::{debug, warn};

use crate::axis::{Axis, AxisBindings, AxisBounds, Interval, Region};
use crate::input::ChordSet;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    pub axis: BTreeMap<String, AxisConfig>,
}

/// Global key bindings shared by every axis
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    /// While held, every axis receives a neutral direction
    #[serde(default)]
    pub ignore: ChordSet,
    /// While held, every axis is recentered and receives a neutral direction
    #[serde(default)]
    pub recenter: ChordSet,
    /// Pressing flips between active and inactive
    #[serde(default)]
    pub toggle: ChordSet,
}

/// Driver loop settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    #[serde(default = "default_cadence_ms")]
    pub cadence_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            cadence_ms: default_cadence_ms(),
        }
    }
}

/// Single axis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxisConfig {
    #[serde(default)]
    pub positive: ChordSet,
    #[serde(default)]
    pub negative: ChordSet,
    /// Output device axis name, forwarded to the output layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(rename = "default", default = "default_value")]
    pub default_value: f64,
    #[serde(default = "default_min_input")]
    pub min_input: f64,
    #[serde(default = "default_max_input")]
    pub max_input: f64,
    #[serde(default = "default_min_output")]
    pub min_output: i64,
    #[serde(default = "default_max_output")]
    pub max_output: i64,
    /// Interval literal -> rates; order does not matter
    pub regions: HashMap<String, RegionConfig>,
}

/// Rates of one region, in domain units per second
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RegionConfig {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl AppConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_yaml(&contents).with_context(|| format!("Failed to load config: {}", path))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml).context("Failed to parse YAML config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for correctness and consistency
    ///
    /// Partition rules are checked when the axes are built.
    pub fn validate(&self) -> Result<()> {
        if self.axis.is_empty() {
            anyhow::bail!("At least one axis must be defined");
        }

        if self.driver.cadence_ms == 0 {
            anyhow::bail!("driver.cadence_ms must be greater than zero");
        }

        for (name, axis) in &self.axis {
            if name.trim().is_empty() {
                anyhow::bail!("Axis name cannot be empty");
            }

            if axis.regions.is_empty() {
                anyhow::bail!("Axis '{}' must define at least one region", name);
            }

            if axis.min_output >= axis.max_output {
                anyhow::bail!(
                    "Axis '{}' has min_output {} not below max_output {}",
                    name,
                    axis.min_output,
                    axis.max_output
                );
            }

            if axis.positive.is_empty() && axis.negative.is_empty() {
                warn!("Axis '{}' has no key bindings and will only follow neutral rates", name);
            }
        }

        Ok(())
    }

    /// Build every configured axis, keyed by name
    pub fn build_axes(&self) -> Result<BTreeMap<String, Axis>> {
        self.axis
            .iter()
            .map(|(name, axis)| -> Result<(String, Axis)> {
                let built = axis
                    .build()
                    .with_context(|| format!("Invalid axis '{}'", name))?;
                debug!("Axis '{}' built with {} regions", name, built.regions().len());
                Ok((name.clone(), built))
            })
            .collect()
    }
}

impl AxisConfig {
    pub fn bounds(&self) -> AxisBounds {
        AxisBounds {
            min_input: self.min_input,
            max_input: self.max_input,
            min_output: self.min_output,
            max_output: self.max_output,
        }
    }

    /// Parse the region literals and construct the axis
    pub fn build(&self) -> Result<Axis> {
        let regions = self
            .regions
            .iter()
            .map(|(literal, rates)| -> Result<Region> {
                let interval: Interval = literal.parse()?;
                let region = Region::new(interval, rates.positive, rates.neutral, rates.negative)?;
                Ok(region)
            })
            .collect::<Result<Vec<_>>>()?;

        let bindings = AxisBindings {
            positive: self.positive.clone(),
            negative: self.negative.clone(),
        };

        Ok(Axis::new(regions, self.bounds(), self.default_value, bindings)?)
    }
}

// Default value functions
fn default_cadence_ms() -> u64 { 15 }
fn default_value() -> f64 { 0.0 }
fn default_min_input() -> f64 { -1.0 }
fn default_max_input() -> f64 { 1.0 }
fn default_min_output() -> i64 { 0 }
fn default_max_output() -> i64 { 32768 }
