//! Gesture detection task

use defmt::*;
use embassy_time::Timer;

use tiltscope_core::config::PipelineConfig;
use tiltscope_pipeline::workers::GestureWorker;

use crate::channels::STORE;

/// Classify every fresh reading and post gestures for the LED
#[embassy_executor::task]
pub async fn gesture_task(config: PipelineConfig) {
    info!("Gesture task started");

    let worker = GestureWorker::new(&STORE, &config);

    loop {
        if let Some(gesture) = worker.step().await {
            info!("Gesture detected: {:?}", gesture);
        }
        Timer::after(worker.period()).await;
    }
}
