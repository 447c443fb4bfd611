//! RGB LED actuation model
//!
//! Gestures drive a small state: an on/off latch, a colour and a
//! brightness. The actuation loop consumes every pending gesture at once,
//! updates the state, then pushes it to an [`RgbOutput`].

use crate::gesture::{Gesture, GestureFlags};
use crate::rng::XorShift32;
use crate::traits::{OutputError, RgbOutput};

/// Brightness step applied per tilt
pub const BRIGHTNESS_STEP: u8 = 10;

/// Colour as three channel percentages (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbLevel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbLevel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel drawn from `0..100`
    pub fn random(rng: &mut XorShift32) -> Self {
        Self {
            r: rng.below(100) as u8,
            g: rng.below(100) as u8,
            b: rng.below(100) as u8,
        }
    }
}

/// LED state driven by gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationState {
    /// On/off latch, toggled by a flip
    pub on: bool,
    /// Colour, re-randomized by a shake
    pub color: RgbLevel,
    /// Brightness percentage, stepped by a tilt
    pub brightness: u8,
}

impl Default for ActuationState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl ActuationState {
    /// Power-on state: lit, white, half brightness
    pub const INITIAL: Self = Self {
        on: true,
        color: RgbLevel::new(100, 100, 100),
        brightness: 50,
    };

    /// Apply one gesture
    pub fn apply(&mut self, gesture: Gesture, rng: &mut XorShift32) {
        match gesture {
            Gesture::Shake => self.color = RgbLevel::random(rng),
            Gesture::Tilt => {
                self.brightness = (self.brightness.saturating_add(BRIGHTNESS_STEP)) % 100;
            }
            Gesture::Flip => self.on = !self.on,
        }
    }

    /// Apply a whole set of pending gestures, shake first, then tilt, then flip
    pub fn apply_all(&mut self, flags: GestureFlags, rng: &mut XorShift32) {
        for gesture in flags.iter() {
            self.apply(gesture, rng);
        }
    }

    /// Levels sent to the output: the colour and brightness when on, all
    /// zero when off
    pub fn output_levels(&self) -> (RgbLevel, u8) {
        if self.on {
            (self.color, self.brightness)
        } else {
            (RgbLevel::new(0, 0, 0), 0)
        }
    }

    /// Push the current state to an output
    pub fn drive<O: RgbOutput + ?Sized>(&self, output: &mut O) -> Result<(), OutputError> {
        let (color, brightness) = self.output_levels();
        output.set(color.r, color.g, color.b, brightness)
    }
}
