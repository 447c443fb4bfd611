//! Sensor data model
//!
//! - [`SensorSnapshot`]: one consistent reading of both sensors plus temperature
//! - [`RollingBuffer`] / [`PlotHistory`]: fixed-length plot history
//! - [`LogRecord`]: the six-float record streamed to the diagnostic log

pub mod history;
pub mod record;

pub use history::{AxisTraces, PlotHistory, RollingBuffer, HISTORY_LEN};
pub use record::{LogLine, LogRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Which sensor a view or trace refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// Accelerometer, m/s²
    Accel,
    /// Magnetometer, gauss
    Mag,
}

impl SensorKind {
    /// Title shown at the top of numeric and plot views
    pub fn title(&self) -> &'static str {
        match self {
            SensorKind::Accel => "Acceleration",
            SensorKind::Mag => "Magnetometer",
        }
    }
}

/// One consistent reading of every channel
///
/// Always written as a whole; readers never see axes from two different
/// fetches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSnapshot {
    /// Acceleration in m/s²
    pub accel: Vector3,
    /// Magnetic field in gauss
    pub mag: Vector3,
    /// Die temperature in °C
    pub temperature: f32,
}

impl SensorSnapshot {
    pub const ZERO: Self = Self {
        accel: Vector3::ZERO,
        mag: Vector3::ZERO,
        temperature: 0.0,
    };

    /// Reading of one sensor
    pub fn vector(&self, kind: SensorKind) -> Vector3 {
        match kind {
            SensorKind::Accel => self.accel,
            SensorKind::Mag => self.mag,
        }
    }

    /// Record for the diagnostic log
    pub fn log_record(&self) -> LogRecord {
        LogRecord {
            values: [
                self.accel.x,
                self.accel.y,
                self.accel.z,
                self.mag.x,
                self.mag.y,
                self.mag.z,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
        assert_eq!(Vector3::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_vector_by_kind() {
        let snap = SensorSnapshot {
            accel: Vector3::new(1.0, 2.0, 3.0),
            mag: Vector3::new(4.0, 5.0, 6.0),
            temperature: 21.0,
        };
        assert_eq!(snap.vector(SensorKind::Accel).y, 2.0);
        assert_eq!(snap.vector(SensorKind::Mag).z, 6.0);
        assert_eq!(snap.log_record().values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
