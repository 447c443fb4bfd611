//! Embassy async tasks
//!
//! Each task wraps one pipeline worker, owns its peripheral and sleeps for
//! whatever the worker asks between steps. They communicate only through
//! [`STORE`](crate::channels::STORE).

pub mod acquisition;
pub mod actuation;
pub mod button;
pub mod display;
pub mod gesture;
pub mod logging;

pub use acquisition::acquisition_task;
pub use actuation::actuation_task;
pub use button::button_task;
pub use display::display_task;
pub use gesture::gesture_task;
pub use logging::logging_task;
