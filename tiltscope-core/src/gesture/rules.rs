//! Ordered gesture classification rules
//!
//! Rules are evaluated top to bottom and the first match wins, so a reading
//! that is both a shake and a tilt only ever reports the shake.

use super::Gesture;
use crate::config::GestureThresholds;
use crate::sensor::Vector3;

/// One classification rule
pub struct GestureRule {
    pub gesture: Gesture,
    /// Predicate over thresholds, acceleration and its magnitude
    pub matches: fn(&GestureThresholds, Vector3, f32) -> bool,
}

fn is_shake(t: &GestureThresholds, _accel: Vector3, magnitude: f32) -> bool {
    magnitude > t.shake
}

fn is_tilt(t: &GestureThresholds, accel: Vector3, _magnitude: f32) -> bool {
    libm::fabsf(accel.x) > t.tilt || libm::fabsf(accel.y) > t.tilt
}

fn is_flip(t: &GestureThresholds, accel: Vector3, _magnitude: f32) -> bool {
    accel.z < t.flip
}

/// Classification rules in priority order
pub const GESTURE_RULES: [GestureRule; 3] = [
    GestureRule {
        gesture: Gesture::Shake,
        matches: is_shake,
    },
    GestureRule {
        gesture: Gesture::Tilt,
        matches: is_tilt,
    },
    GestureRule {
        gesture: Gesture::Flip,
        matches: is_flip,
    },
];

/// Classify one acceleration sample into at most one gesture
pub fn classify(thresholds: &GestureThresholds, accel: Vector3) -> Option<Gesture> {
    let magnitude = accel.magnitude();
    GESTURE_RULES
        .iter()
        .find(|rule| (rule.matches)(thresholds, accel, magnitude))
        .map(|rule| rule.gesture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(x: f32, y: f32, z: f32) -> Option<Gesture> {
        classify(&GestureThresholds::default(), Vector3::new(x, y, z))
    }

    #[test]
    fn test_resting_flat_is_quiet() {
        assert_eq!(classify_default(0.1, -0.2, 9.8), None);
    }

    #[test]
    fn test_shake() {
        assert_eq!(classify_default(0.0, 0.0, 15.0), Some(Gesture::Shake));
    }

    #[test]
    fn test_shake_beats_tilt() {
        // |x| > tilt threshold and magnitude > shake threshold
        assert_eq!(classify_default(10.0, 0.0, 9.8), Some(Gesture::Shake));
    }

    #[test]
    fn test_shake_uses_magnitude_not_single_axis() {
        // No axis reaches the shake threshold, the magnitude (~13.9) does
        assert_eq!(classify_default(8.0, 8.0, 8.0), Some(Gesture::Shake));
        assert_eq!(classify_default(0.0, 0.0, -11.9), Some(Gesture::Flip));
    }

    #[test]
    fn test_tilt_on_either_axis() {
        assert_eq!(classify_default(3.0, 0.0, 9.0), Some(Gesture::Tilt));
        assert_eq!(classify_default(0.0, -3.0, 9.0), Some(Gesture::Tilt));
    }

    #[test]
    fn test_tilt_beats_flip() {
        assert_eq!(classify_default(2.5, 0.0, -9.5), Some(Gesture::Tilt));
    }

    #[test]
    fn test_flip() {
        assert_eq!(classify_default(0.0, 0.0, -9.5), Some(Gesture::Flip));
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(classify_default(2.0, 0.0, 9.0), None);
        assert_eq!(classify_default(0.0, 0.0, -9.0), None);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = GestureThresholds {
            shake: 20.0,
            tilt: 5.0,
            flip: -5.0,
        };
        assert_eq!(classify(&t, Vector3::new(0.0, 0.0, 15.0)), None);
        assert_eq!(classify(&t, Vector3::new(0.0, 0.0, -6.0)), Some(Gesture::Flip));
    }
}
