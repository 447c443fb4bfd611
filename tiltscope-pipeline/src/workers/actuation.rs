//! Actuation loop: gestures drive the RGB LED

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use tiltscope_core::actuation::ActuationState;
use tiltscope_core::config::PipelineConfig;
use tiltscope_core::gesture::GestureFlags;
use tiltscope_core::rng::XorShift32;
use tiltscope_core::traits::{OutputError, RgbOutput};

use crate::store::Store;

/// What one actuation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationReport {
    /// Gestures consumed
    pub flags: GestureFlags,
    /// State after applying them
    pub state: ActuationState,
    /// Whether the output accepted the new levels
    pub output: Result<(), OutputError>,
}

/// Owns the LED state and its output
pub struct ActuationWorker<'a, M: RawMutex, O: RgbOutput> {
    store: &'a Store<M>,
    output: O,
    state: ActuationState,
    rng: XorShift32,
    period: Duration,
}

impl<'a, M: RawMutex, O: RgbOutput> ActuationWorker<'a, M, O> {
    pub fn new(store: &'a Store<M>, output: O, rng: XorShift32, config: &PipelineConfig) -> Self {
        Self {
            store,
            output,
            state: ActuationState::INITIAL,
            rng,
            period: Duration::from_millis(config.timing.actuation_ms as u64),
        }
    }

    pub fn state(&self) -> ActuationState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Push the power-on state to the LED
    pub fn apply_initial(&mut self) -> Result<(), OutputError> {
        self.state.drive(&mut self.output)
    }

    /// Wait for any gesture, act on the whole pending set, then clear it
    ///
    /// A rejected output leaves the state updated; the next successful step
    /// catches the LED up.
    pub async fn step(&mut self) -> ActuationReport {
        let flags = self.store.wait_any_gesture(GestureFlags::ALL).await;
        self.state.apply_all(flags, &mut self.rng);
        let output = self.state.drive(&mut self.output);
        self.store.clear_gestures();
        ActuationReport {
            flags,
            state: self.state,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use tiltscope_core::actuation::RgbLevel;

    #[derive(Default)]
    struct Led {
        last: Option<(u8, u8, u8, u8)>,
        writes: usize,
    }

    impl RgbOutput for &mut Led {
        fn set(&mut self, r: u8, g: u8, b: u8, brightness: u8) -> Result<(), OutputError> {
            self.writes += 1;
            self.last = Some((r, g, b, brightness));
            Ok(())
        }
    }

    #[test]
    fn test_initial_output() {
        let store = Store::<NoopRawMutex>::new();
        let mut led = Led::default();
        let mut worker =
            ActuationWorker::new(&store, &mut led, XorShift32::new(1), &PipelineConfig::default());
        worker.apply_initial().unwrap();
        drop(worker);
        assert_eq!(led.last, Some((100, 100, 100, 50)));
    }

    #[test]
    fn test_flip_turns_off_and_clears() {
        let store = Store::<NoopRawMutex>::new();
        let mut led = Led::default();
        let mut worker =
            ActuationWorker::new(&store, &mut led, XorShift32::new(1), &PipelineConfig::default());

        store.raise_gesture(GestureFlags::FLIP);
        let report = block_on(worker.step());
        assert_eq!(report.flags, GestureFlags::FLIP);
        assert!(!report.state.on);
        assert_eq!(report.output, Ok(()));
        assert!(store.pending_gestures().is_empty());
        drop(worker);
        assert_eq!(led.last, Some((0, 0, 0, 0)));
    }

    #[test]
    fn test_combined_set_applied_once() {
        let store = Store::<NoopRawMutex>::new();
        let mut led = Led::default();
        let mut worker =
            ActuationWorker::new(&store, &mut led, XorShift32::new(5), &PipelineConfig::default());

        store.raise_gesture(GestureFlags::TILT);
        store.raise_gesture(GestureFlags::SHAKE);
        let report = block_on(worker.step());
        assert_eq!(report.state.brightness, 60);
        assert!(report.state.on);
        assert_ne!(report.state.color, RgbLevel::new(100, 100, 100));
        drop(worker);
        assert_eq!(led.writes, 1);
    }

    struct Rejecting;

    impl RgbOutput for Rejecting {
        fn set(&mut self, _r: u8, _g: u8, _b: u8, _brightness: u8) -> Result<(), OutputError> {
            Err(OutputError::Pwm)
        }
    }

    #[test]
    fn test_output_error_reported_and_flags_cleared() {
        let store = Store::<NoopRawMutex>::new();
        let mut worker =
            ActuationWorker::new(&store, Rejecting, XorShift32::new(1), &PipelineConfig::default());
        store.raise_gesture(GestureFlags::TILT);
        let report = block_on(worker.step());
        assert_eq!(report.output, Err(OutputError::Pwm));
        assert_eq!(worker.state().brightness, 60);
        assert!(store.pending_gestures().is_empty());
    }
}
