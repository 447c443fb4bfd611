//! Worker loops as step functions
//!
//! Each worker borrows the [`Store`](crate::Store) and performs one
//! iteration of its loop per call. Blocking waits (data-ready, gesture
//! flags, log queue) happen inside the step; fixed sleeps are left to the
//! caller, which receives the period or delay to wait before the next step.

pub mod acquisition;
pub mod actuation;
pub mod dispatcher;
pub mod gesture;
pub mod log;

pub use acquisition::{Acquisition, CycleOutcome};
pub use actuation::{ActuationReport, ActuationWorker};
pub use dispatcher::{Dispatcher, DispatcherState, Step};
pub use gesture::GestureWorker;
pub use log::LogConsumer;
