//! Gesture loop: classify each new reading

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use tiltscope_core::config::{GestureThresholds, PipelineConfig};
use tiltscope_core::gesture::{classify, Gesture};

use crate::store::Store;

/// Turns fresh readings into gesture flags
pub struct GestureWorker<'a, M: RawMutex> {
    store: &'a Store<M>,
    thresholds: GestureThresholds,
    period: Duration,
}

impl<'a, M: RawMutex> GestureWorker<'a, M> {
    pub fn new(store: &'a Store<M>, config: &PipelineConfig) -> Self {
        Self {
            store,
            thresholds: config.gesture,
            period: Duration::from_millis(config.timing.gesture_ms as u64),
        }
    }

    /// Pause after each classification
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for data-ready, classify the latest snapshot and post the result
    pub async fn step(&self) -> Option<Gesture> {
        self.store.wait_data_ready().await;
        let snapshot = self.store.read_snapshot().await;
        let gesture = classify(&self.thresholds, snapshot.accel)?;
        self.store.raise_gesture(gesture.flag());
        Some(gesture)
    }
}
