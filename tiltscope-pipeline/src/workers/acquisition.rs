//! Acquisition loop: fetch, publish, repeat

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use tiltscope_core::config::{FetchFailurePolicy, PipelineConfig};
use tiltscope_core::traits::{MotionSensor, SensorError};

use crate::store::{LogEnqueue, Store};

/// Result of one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// A snapshot was published
    Published(LogEnqueue),
    /// No new sample yet, or the fetch failed under a retry policy
    Skipped(SensorError),
    /// The fetch failed and the loop must stop
    Halted(SensorError),
}

/// Sensor sampling loop
pub struct Acquisition<'a, M: RawMutex, S: MotionSensor> {
    store: &'a Store<M>,
    sensor: S,
    policy: FetchFailurePolicy,
    period: Duration,
    consecutive_failures: u16,
}

impl<'a, M: RawMutex, S: MotionSensor> Acquisition<'a, M, S> {
    pub fn new(store: &'a Store<M>, sensor: S, config: &PipelineConfig) -> Self {
        Self {
            store,
            sensor,
            policy: config.acquisition.failure_policy,
            period: Duration::from_millis(config.timing.acquisition_ms as u64),
            consecutive_failures: 0,
        }
    }

    /// Sleep between cycles
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fetch once and publish, applying the failure policy on error
    ///
    /// A sensor with no new sample is not a failure: the cycle is skipped
    /// and does not count toward the policy.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.sensor.fetch().await {
            Ok(snapshot) => {
                self.consecutive_failures = 0;
                CycleOutcome::Published(self.store.publish_sensors(snapshot).await)
            }
            Err(SensorError::NoData) => CycleOutcome::Skipped(SensorError::NoData),
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                match self.policy {
                    FetchFailurePolicy::Halt => CycleOutcome::Halted(e),
                    FetchFailurePolicy::Retry { max_consecutive }
                        if max_consecutive != 0
                            && self.consecutive_failures >= max_consecutive =>
                    {
                        CycleOutcome::Halted(e)
                    }
                    FetchFailurePolicy::Retry { .. } => CycleOutcome::Skipped(e),
                }
            }
        }
    }
}
