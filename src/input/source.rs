//! Input sources polled once per tick by the driver loop
//!
//! Reading a physical keyboard is platform specific and lives outside this
//! crate. [`ScriptedInput`] replays a YAML script instead, which is what the
//! binary uses for simulations and what the tests drive.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::VecDeque;
use tokio::fs;
use tracing::debug;

use super::snapshot::InputSnapshot;

/// Produces one input snapshot per tick
pub trait InputSource {
    /// Snapshot for the next tick, or `None` once the source is exhausted
    fn poll(&mut self) -> Option<InputSnapshot>;
}

/// Source that never holds anything and never ends
#[derive(Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> Option<InputSnapshot> {
        Some(InputSnapshot::new())
    }
}

/// One step of an input script
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    /// Tokens held during this step
    #[serde(default)]
    pub hold: Vec<String>,
    /// Number of ticks the step lasts
    #[serde(default = "default_ticks")]
    pub ticks: u32,
}

/// Replays a fixed sequence of held-token steps
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: VecDeque<ScriptStep>,
    remaining: u32,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        let steps: VecDeque<ScriptStep> = steps.into_iter().filter(|s| s.ticks > 0).collect();
        let remaining = steps.front().map(|s| s.ticks).unwrap_or(0);
        Self { steps, remaining }
    }

    /// Parse a script from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let steps: Vec<ScriptStep> = serde_yaml::from_str(yaml).context("Failed to parse input script")?;
        Ok(Self::new(steps))
    }

    /// Load a script from a YAML file
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input script: {}", path))?;
        let script = Self::from_yaml(&contents).with_context(|| format!("Invalid input script: {}", path))?;
        debug!("Loaded input script {} ({} ticks)", path, script.total_ticks());
        Ok(script)
    }

    /// Ticks left before the script ends
    pub fn total_ticks(&self) -> u64 {
        let rest: u64 = self.steps.iter().skip(1).map(|s| u64::from(s.ticks)).sum();
        rest + u64::from(self.remaining)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputSnapshot> {
        let step = self.steps.front()?;
        let snapshot: InputSnapshot = step.hold.iter().cloned().collect();

        self.remaining -= 1;
        if self.remaining == 0 {
            self.steps.pop_front();
            self.remaining = self.steps.front().map(|s| s.ticks).unwrap_or(0);
        }

        Some(snapshot)
    }
}

fn default_ticks() -> u32 {
    1
}
