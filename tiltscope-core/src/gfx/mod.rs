//! Monochrome rendering engine
//!
//! Pixel, line, rectangle and circle primitives on a packed 84x48 bitmap,
//! the value-to-pixel mapper used by the plot views, and the [`Screen`]
//! that pairs a bitmap with its text overlay.

pub mod framebuffer;
pub mod scale;
pub mod screen;

pub use framebuffer::{Framebuffer, BANKS, BUFFER_LEN, HEIGHT, WIDTH};
pub use scale::map_value_to_pixel;
pub use screen::{Screen, TextItem};
