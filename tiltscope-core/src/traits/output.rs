//! RGB actuation output trait

/// Errors that can occur when driving the RGB output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// A channel or brightness percentage above 100
    OutOfRange,
    /// The underlying PWM channel rejected the duty cycle
    Pwm,
}

/// Three-channel LED driven by percentages
///
/// Each channel's effective output is proportional to
/// `channel% * brightness% / 100²`.
pub trait RgbOutput {
    /// Set all three channels and the overall brightness, each 0..=100
    fn set(&mut self, r: u8, g: u8, b: u8, brightness: u8) -> Result<(), OutputError>;

    /// Switch the LED fully off
    fn off(&mut self) -> Result<(), OutputError> {
        self.set(0, 0, 0, 0)
    }
}

/// Reject a percentage above 100
pub fn check_percent(value: u8) -> Result<u8, OutputError> {
    if value > 100 {
        Err(OutputError::OutOfRange)
    } else {
        Ok(value)
    }
}

/// Scale a period by a channel and a brightness percentage
///
/// Returns `period * channel * brightness / 10000`, rejecting percentages
/// above 100.
pub fn scale_pulse(period: u32, channel: u8, brightness: u8) -> Result<u32, OutputError> {
    let channel = check_percent(channel)? as u64;
    let brightness = check_percent(brightness)? as u64;
    Ok((period as u64 * channel * brightness / 10_000) as u32)
}
