//! Value-to-pixel scaling for plots

use super::framebuffer::HEIGHT;

/// Map a value in `[min, max]` onto a display row
///
/// The value is clamped into the range first. `min` lands on the bottom row
/// (`HEIGHT - 1`) and `max` on the top row (0), since Y grows downward on the
/// panel. A degenerate range (`min >= max`) or a NaN value maps to the
/// vertical centre.
pub fn map_value_to_pixel(value: f32, min: f32, max: f32) -> i32 {
    let center = (HEIGHT / 2) as i32;
    if !(min < max) || value.is_nan() {
        return center;
    }

    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    };

    // Truncates toward zero; the offset is never negative here
    let pixel = ((clamped - min) * (HEIGHT as f32 - 1.0) / (max - min)) as i32;
    HEIGHT as i32 - 1 - pixel
}
