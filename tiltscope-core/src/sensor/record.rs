//! Diagnostic log records

use core::fmt::Write;

use heapless::String;

/// Maximum formatted log line length
pub const LOG_LINE_LEN: usize = 128;

/// Formatted log line
pub type LogLine = String<LOG_LINE_LEN>;

/// Accel XYZ followed by mag XYZ, as queued for the log consumer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogRecord {
    pub values: [f32; 6],
}

impl LogRecord {
    /// Format as a single terminal line
    ///
    /// Values that would overflow the line are cut off rather than failing.
    pub fn format(&self) -> LogLine {
        let [ax, ay, az, mx, my, mz] = self.values;
        let mut line = LogLine::new();
        let _ = write!(
            line,
            "Accel: X={:.2}, Y={:.2}, Z={:.2} | Mag: X={:.2}, Y={:.2}, Z={:.2}",
            ax, ay, az, mx, my, mz
        );
        line
    }
}
