//! Motion sensor trait

use crate::sensor::SensorSnapshot;

/// Errors that can occur when reading the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not answer or reported an unexpected identity
    NotReady,
    /// Bus transfer failed
    Bus,
    /// Device answered but no new sample was available
    NoData,
}

/// Source of combined accelerometer, magnetometer and temperature samples
///
/// `fetch` takes `&mut self` because a bus transaction is needed for every
/// sample. Readings are returned in m/s², gauss and °C.
#[allow(async_fn_in_trait)]
pub trait MotionSensor {
    /// Read one consistent sample of every channel
    async fn fetch(&mut self) -> Result<SensorSnapshot, SensorError>;
}
