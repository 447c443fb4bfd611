//! Shared state between Embassy tasks
//!
//! Every loop talks through the one [`Store`]; there are no other statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use tiltscope_pipeline::Store;

/// Sensor snapshot, plot history, mode, gesture flags and log queue
pub static STORE: Store<CriticalSectionRawMutex> = Store::new();
