//! Hardware abstraction traits
//!
//! These traits define the interface between the pipeline and the
//! board-specific sensor, display and LED implementations.

pub mod display;
pub mod output;
pub mod sensor;

pub use display::{DisplayError, DisplaySink, DisplaySinkExt};
pub use output::{OutputError, RgbOutput};
pub use sensor::{MotionSensor, SensorError};
