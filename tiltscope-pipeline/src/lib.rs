//! Concurrent sensor pipeline for Tiltscope
//!
//! [`Store`] is the single shared state of the device: the latest sensor
//! snapshot and plot history behind an async mutex, the lock-free display
//! mode, a data-ready signal, the gesture flag bus and the bounded log
//! queue. The loops in [`workers`] are written as step functions over a
//! `&Store` so that the executor owns all sleeping and every loop can be
//! driven deterministically in tests.
//!
//! The crate is generic over [`RawMutex`](embassy_sync::blocking_mutex::raw::RawMutex):
//! firmware uses `CriticalSectionRawMutex` with a `static` store, tests use
//! the same or `NoopRawMutex`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gesture_bus;
pub mod store;
pub mod workers;

pub use gesture_bus::GestureBus;
pub use store::{LogEnqueue, SensorState, Store, LOG_QUEUE_DEPTH};
