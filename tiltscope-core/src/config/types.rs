//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::SensorKind;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Malformed `[section]` header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
    /// A loop period of zero
    ZeroPeriod,
    /// Plot range with min >= max
    InvalidRange,
    /// Shake threshold not positive
    InvalidThreshold,
    /// Minimum snake frame longer than the base frame
    InvalidFrameTiming,
}

/// Loop periods in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Sensor fetch period
    pub acquisition_ms: u32,
    /// Pause after each gesture classification
    pub gesture_ms: u32,
    /// Pause after each LED update
    pub actuation_ms: u32,
    /// Redraw period of the live views
    pub display_ms: u32,
    /// Pause after each printed log line
    pub log_ms: u32,
    /// Mode poll period while the splash screen is up
    pub splash_poll_ms: u32,
    /// Mode poll period while the game summary is up
    pub game_exit_poll_ms: u32,
    /// How long the game summary is held before polling
    pub summary_hold_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            acquisition_ms: 50,
            gesture_ms: 200,
            actuation_ms: 200,
            display_ms: 100,
            log_ms: 200,
            splash_poll_ms: 50,
            game_exit_poll_ms: 100,
            summary_hold_ms: 1000,
        }
    }
}

impl TimingConfig {
    fn periods(&self) -> [u32; 8] {
        [
            self.acquisition_ms,
            self.gesture_ms,
            self.actuation_ms,
            self.display_ms,
            self.log_ms,
            self.splash_poll_ms,
            self.game_exit_poll_ms,
            self.summary_hold_ms,
        ]
    }
}

/// Gesture classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureThresholds {
    /// Acceleration magnitude above which a shake is reported (m/s²)
    pub shake: f32,
    /// |x| or |y| acceleration above which a tilt is reported (m/s²)
    pub tilt: f32,
    /// Z acceleration below which a flip is reported (m/s²)
    pub flip: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            shake: 12.0,
            tilt: 2.0,
            flip: -9.0,
        }
    }
}

/// Value range drawn by a plot view
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotRange {
    pub min: f32,
    pub max: f32,
}

impl PlotRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-limit, limit]`
    pub const fn symmetric(limit: f32) -> Self {
        Self::new(-limit, limit)
    }

    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }
}

/// Plot view ranges
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotConfig {
    /// Accelerometer plot range (m/s²)
    pub accel: PlotRange,
    /// Magnetometer plot range (gauss)
    pub mag: PlotRange,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            accel: PlotRange::symmetric(40.0),
            mag: PlotRange::symmetric(5.0),
        }
    }
}

impl PlotConfig {
    pub fn range(&self, kind: SensorKind) -> PlotRange {
        match kind {
            SensorKind::Accel => self.accel,
            SensorKind::Mag => self.mag,
        }
    }
}

/// Snake game tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnakeConfig {
    /// Frame period at score 0
    pub base_frame_ms: u32,
    /// Frame period reduction per point
    pub speedup_ms: u32,
    /// Shortest frame period
    pub min_frame_ms: u32,
    /// Acceleration needed to steer (m/s²)
    pub steer_threshold: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            base_frame_ms: 300,
            speedup_ms: 15,
            min_frame_ms: 100,
            steer_threshold: 0.5,
        }
    }
}

impl SnakeConfig {
    /// Frame period for a score: `max(base - speedup * score, min)`
    pub fn frame_ms(&self, score: u32) -> u32 {
        self.base_frame_ms
            .saturating_sub(self.speedup_ms.saturating_mul(score))
            .max(self.min_frame_ms)
    }
}

/// What the acquisition loop does when a fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FetchFailurePolicy {
    /// Stop the acquisition loop on the first device failure
    #[default]
    Halt,
    /// Skip the cycle and try again next period
    ///
    /// The loop halts after `max_consecutive` failures in a row; 0 retries
    /// forever.
    Retry { max_consecutive: u16 },
}

/// Acquisition loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcquisitionConfig {
    pub failure_policy: FetchFailurePolicy,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    pub timing: TimingConfig,
    pub gesture: GestureThresholds,
    pub plot: PlotConfig,
    pub snake: SnakeConfig,
    pub acquisition: AcquisitionConfig,
}

impl PipelineConfig {
    /// Check the configuration for values the loops cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.periods().contains(&0) {
            return Err(ConfigError::ZeroPeriod);
        }
        if !self.plot.accel.is_valid() || !self.plot.mag.is_valid() {
            return Err(ConfigError::InvalidRange);
        }
        if !(self.gesture.shake > 0.0) {
            return Err(ConfigError::InvalidThreshold);
        }
        if self.snake.base_frame_ms == 0 || self.snake.min_frame_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.snake.min_frame_ms > self.snake.base_frame_ms {
            return Err(ConfigError::InvalidFrameTiming);
        }
        Ok(())
    }
}
