//! Sensor log task
//!
//! Prints queued readings over RTT. Records that arrived while the queue
//! was full were already dropped by the acquisition task.

use defmt::*;
use embassy_time::Timer;

use tiltscope_core::config::PipelineConfig;
use tiltscope_pipeline::workers::LogConsumer;

use crate::channels::STORE;

#[embassy_executor::task]
pub async fn logging_task(config: PipelineConfig) {
    info!("Logging task started");

    let consumer = LogConsumer::new(&STORE, &config);

    loop {
        let line = consumer.next_line().await;
        info!("{=str}", line.as_str());
        Timer::after(consumer.period()).await;
    }
}
