//! Shared sensor and state store
//!
//! All cross-task state lives here:
//!
//! | state | guard | writer | readers |
//! |-------|-------|--------|---------|
//! | snapshot + plot history | async mutex | acquisition | gesture, display |
//! | mode | atomic | button | display |
//! | data ready | binary signal | acquisition | gesture |
//! | gesture flags | atomic + signal | gesture | actuation |
//! | log records | bounded channel | acquisition | log consumer |
//!
//! Critical sections only copy plain data in or out; no display or bus
//! access ever happens while the mutex is held.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU8, Ordering};

use tiltscope_core::gesture::GestureFlags;
use tiltscope_core::mode::{InvalidMode, Mode};
use tiltscope_core::sensor::{AxisTraces, LogRecord, PlotHistory, SensorKind, SensorSnapshot};

use crate::gesture_bus::GestureBus;

/// Log queue capacity
pub const LOG_QUEUE_DEPTH: usize = 10;

/// Data guarded by the store mutex
#[derive(Debug, Clone)]
pub struct SensorState {
    pub snapshot: SensorSnapshot,
    pub history: PlotHistory,
}

impl SensorState {
    pub const fn new() -> Self {
        Self {
            snapshot: SensorSnapshot::ZERO,
            history: PlotHistory::new(),
        }
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened to the log record of a publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogEnqueue {
    Queued,
    /// Queue was full; the record was discarded
    Dropped,
}

/// Single source of truth shared by every loop
pub struct Store<M: RawMutex> {
    sensors: Mutex<M, SensorState>,
    mode: AtomicU8,
    data_ready: Signal<M, ()>,
    gestures: GestureBus<M>,
    log: Channel<M, LogRecord, LOG_QUEUE_DEPTH>,
}

impl<M: RawMutex> Default for Store<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> Store<M> {
    /// Empty store showing the splash screen; usable in a `static`
    pub const fn new() -> Self {
        Self {
            sensors: Mutex::new(SensorState::new()),
            mode: AtomicU8::new(Mode::Splash as u8),
            data_ready: Signal::new(),
            gestures: GestureBus::new(),
            log: Channel::new(),
        }
    }

    // Sensor data

    /// Publish a new reading
    ///
    /// Overwrites the snapshot and appends to the plot history in one
    /// critical section, then signals data-ready and offers a log record
    /// without blocking.
    pub async fn publish_sensors(&self, snapshot: SensorSnapshot) -> LogEnqueue {
        {
            let mut sensors = self.sensors.lock().await;
            sensors.snapshot = snapshot;
            sensors.history.push(&snapshot);
        }
        self.data_ready.signal(());
        match self.log.try_send(snapshot.log_record()) {
            Ok(()) => LogEnqueue::Queued,
            Err(_) => LogEnqueue::Dropped,
        }
    }

    /// Copy of the latest snapshot
    pub async fn read_snapshot(&self) -> SensorSnapshot {
        self.sensors.lock().await.snapshot
    }

    /// Copy of all six plot histories
    pub async fn read_buffers(&self) -> PlotHistory {
        self.sensors.lock().await.history.clone()
    }

    /// Copy of the three plot histories of one sensor
    pub async fn read_traces(&self, kind: SensorKind) -> AxisTraces {
        self.sensors.lock().await.history.traces(kind).clone()
    }

    /// Wait for the next publish
    ///
    /// Publishes that happen while nobody waits collapse into one.
    pub async fn wait_data_ready(&self) {
        self.data_ready.wait().await
    }

    // Mode

    /// Current mode, or the raw index if it does not decode
    pub fn mode(&self) -> Result<Mode, InvalidMode> {
        Mode::try_from(self.raw_mode())
    }

    pub fn raw_mode(&self) -> u8 {
        self.mode.load(Ordering::Acquire)
    }

    pub fn set_mode(&self, mode: Mode) {
        self.set_raw_mode(mode.index());
    }

    /// Store an index without decoding it
    pub fn set_raw_mode(&self, raw: u8) {
        self.mode.store(raw, Ordering::Release);
    }

    /// Step to the next mode, wrapping to the splash screen
    ///
    /// An invalid index also restarts at the splash screen. Returns the new
    /// mode.
    pub fn advance_mode(&self) -> Mode {
        let next = |raw: u8| Mode::try_from(raw).map(Mode::next).unwrap_or(Mode::Splash);
        let prev = self
            .mode
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some(next(raw).index())
            })
            .unwrap_or_else(|raw| raw);
        next(prev)
    }

    // Gestures

    pub fn raise_gesture(&self, flags: GestureFlags) {
        self.gestures.raise(flags);
    }

    /// Wait until a flag in `mask` is pending; returns the full pending set
    pub async fn wait_any_gesture(&self, mask: GestureFlags) -> GestureFlags {
        self.gestures.wait_any(mask).await
    }

    pub fn pending_gestures(&self) -> GestureFlags {
        self.gestures.pending()
    }

    pub fn clear_gestures(&self) {
        self.gestures.clear();
    }

    // Log queue

    /// Wait for the oldest queued log record
    pub async fn next_log_record(&self) -> LogRecord {
        self.log.receive().await
    }

    /// Oldest queued log record, if any
    pub fn try_next_log_record(&self) -> Option<LogRecord> {
        self.log.try_receive().ok()
    }

    pub fn log_queue_len(&self) -> usize {
        self.log.len()
    }
}
