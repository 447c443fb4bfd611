//! Pure view renderers
//!
//! Each view draws one mode into a cleared [`Screen`](crate::gfx::Screen)
//! from a copy of the data it needs. Nothing here touches the display or
//! shared state; the dispatcher clears, renders, then presents.

pub mod dial;
pub mod plot;
pub mod readout;
pub mod splash;

pub use dial::{compass, inclinometer, level_bubble};
pub use plot::plot;
pub use readout::numeric;
pub use splash::{invalid_mode, splash};
