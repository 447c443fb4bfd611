//! Sensor acquisition task
//!
//! Reads the FXOS8700 at a fixed period and publishes each sample to the
//! store. What happens after a failed read is decided by the configured
//! failure policy.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Timer;

use tiltscope_core::config::PipelineConfig;
use tiltscope_core::traits::SensorError;
use tiltscope_drivers::Fxos8700;
use tiltscope_pipeline::workers::{Acquisition, CycleOutcome};
use tiltscope_pipeline::LogEnqueue;

use crate::channels::STORE;

/// I²C bus the motion sensor sits on
pub type MotionSensorBus = I2c<'static, I2C0, Async>;

#[embassy_executor::task]
pub async fn acquisition_task(mut sensor: Fxos8700<MotionSensorBus>, config: PipelineConfig) {
    info!("Acquisition task started");

    if let Err(e) = sensor.init().await {
        error!("Motion sensor not ready: {:?}", e);
        return;
    }
    info!("FXOS8700 initialized");

    let mut acquisition = Acquisition::new(&STORE, sensor, &config);

    loop {
        match acquisition.run_cycle().await {
            CycleOutcome::Published(LogEnqueue::Queued) => {}
            CycleOutcome::Published(LogEnqueue::Dropped) => {
                trace!("Log queue full, record dropped");
            }
            CycleOutcome::Skipped(SensorError::NoData) => {
                trace!("No new sample yet");
            }
            CycleOutcome::Skipped(e) => {
                warn!("Sensor read failed, retrying: {:?}", e);
            }
            CycleOutcome::Halted(e) => {
                error!("Sensor read failed, acquisition stopped: {:?}", e);
                return;
            }
        }

        Timer::after(acquisition.period()).await;
    }
}
