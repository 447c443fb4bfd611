//! Log consumer: drain the queue into formatted lines

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use tiltscope_core::config::PipelineConfig;
use tiltscope_core::sensor::LogLine;

use crate::store::Store;

pub struct LogConsumer<'a, M: RawMutex> {
    store: &'a Store<M>,
    period: Duration,
}

impl<'a, M: RawMutex> LogConsumer<'a, M> {
    pub fn new(store: &'a Store<M>, config: &PipelineConfig) -> Self {
        Self {
            store,
            period: Duration::from_millis(config.timing.log_ms as u64),
        }
    }

    /// Pause after each printed line
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the oldest record and format it
    pub async fn next_line(&self) -> LogLine {
        self.store.next_log_record().await.format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use tiltscope_core::sensor::{SensorSnapshot, Vector3};

    #[test]
    fn test_lines_in_publish_order() {
        let store = Store::<NoopRawMutex>::new();
        let consumer = LogConsumer::new(&store, &PipelineConfig::default());
        block_on(async {
            for i in 0..3 {
                store
                    .publish_sensors(SensorSnapshot {
                        accel: Vector3::new(i as f32, 0.0, 9.81),
                        mag: Vector3::new(0.25, -0.5, 0.0),
                        temperature: 20.0,
                    })
                    .await;
            }
            for i in 0..3 {
                let line = consumer.next_line().await;
                assert!(line.starts_with(&std::format!("Accel: X={}.00,", i)));
            }
            let line = {
                store.publish_sensors(SensorSnapshot::ZERO).await;
                consumer.next_line().await
            };
            assert_eq!(
                line.as_str(),
                "Accel: X=0.00, Y=0.00, Z=0.00 | Mag: X=0.00, Y=0.00, Z=0.00"
            );
        });
    }
}
