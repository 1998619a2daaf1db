//! Fixed-cadence tick loop

use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::output::OutputSink;
use super::AxisController;
use crate::input::InputSource;

/// How the loop measures the time between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickClock {
    /// Wall-clock time since the previous tick
    Realtime,
    /// Always exactly one cadence, for reproducible simulations
    Fixed,
}

/// Drives an [`AxisController`] at a fixed cadence
pub struct DriverLoop {
    controller: AxisController,
    cadence: Duration,
    clock: TickClock,
}

impl DriverLoop {
    pub fn new(controller: AxisController, cadence: Duration, clock: TickClock) -> Self {
        Self {
            controller,
            cadence,
            clock,
        }
    }

    pub fn controller(&self) -> &AxisController {
        &self.controller
    }

    /// Tick until the input source ends or `shutdown` resolves
    ///
    /// Returns the number of ticks performed.
    pub async fn run<I, O>(
        &mut self,
        input: &mut I,
        sink: &mut O,
        shutdown: impl Future<Output = ()>,
    ) -> Result<u64>
    where
        I: InputSource,
        O: OutputSink,
    {
        info!(
            "Driver loop started ({} axes, {:?} cadence, {:?} clock)",
            self.controller.axes().len(),
            self.cadence,
            self.clock
        );

        let mut interval = time::interval(self.cadence);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        let mut last_tick = Instant::now();
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(snapshot) = input.poll() else {
                        info!("Input source exhausted after {} ticks", ticks);
                        break;
                    };

                    let now = Instant::now();
                    let elapsed = match self.clock {
                        TickClock::Realtime => now.duration_since(last_tick),
                        TickClock::Fixed => self.cadence,
                    };
                    last_tick = now;

                    let readings = self
                        .controller
                        .tick(snapshot, elapsed.as_secs_f64() * 1_000_000.0);
                    sink.publish(&readings)
                        .with_context(|| format!("Failed to publish tick {}", ticks))?;

                    ticks += 1;
                }

                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping driver loop");
                    break;
                }
            }
        }

        debug!("Driver loop finished after {} ticks", ticks);
        Ok(ticks)
    }
}
