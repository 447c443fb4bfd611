//! Orientation math for the compass, level and inclinometer views

use core::f32::consts::PI;

use crate::sensor::Vector3;

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Board attitude derived from gravity, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    /// Rotation about the X axis: `atan2(ay, sqrt(ax² + az²))`
    pub pitch: f32,
    /// Rotation about the Y axis: `atan2(ax, az)`
    pub roll: f32,
}

impl Attitude {
    pub fn from_accel(accel: Vector3) -> Self {
        let pitch = libm::atan2f(
            accel.y,
            libm::sqrtf(accel.x * accel.x + accel.z * accel.z),
        );
        let roll = libm::atan2f(accel.x, accel.z);
        Self {
            pitch: pitch * RAD_TO_DEG,
            roll: roll * RAD_TO_DEG,
        }
    }
}

/// Compass heading `atan2(my, mx)` in degrees, normalized to `[0, 360)`
pub fn heading(mag: Vector3) -> f32 {
    let deg = libm::atan2f(mag.y, mag.x) * RAD_TO_DEG;
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    // -0.0001 + 360 rounds to exactly 360.0 in f32
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}
