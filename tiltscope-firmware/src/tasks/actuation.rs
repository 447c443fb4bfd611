//! RGB LED actuation task
//!
//! Sleeps until the gesture task posts a flag, applies every pending
//! gesture to the LED state and drives the PWM outputs.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::Timer;

use tiltscope_core::config::PipelineConfig;
use tiltscope_core::rng::XorShift32;
use tiltscope_drivers::PwmRgbLed;
use tiltscope_pipeline::workers::ActuationWorker;

use crate::channels::STORE;

/// RGB LED on three PWM slice outputs
pub type StatusLed = PwmRgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

#[embassy_executor::task]
pub async fn actuation_task(led: StatusLed, rng: XorShift32, config: PipelineConfig) {
    info!("Actuation task started");

    let mut worker = ActuationWorker::new(&STORE, led, rng, &config);
    if let Err(e) = worker.apply_initial() {
        warn!("Failed to set initial LED state: {:?}", e);
    }

    loop {
        let report = worker.step().await;
        debug!("LED {:?} after {:?}", report.state, report.flags);
        if let Err(e) = report.output {
            warn!("LED update failed: {:?}", e);
        }
        Timer::after(worker.period()).await;
    }
}
