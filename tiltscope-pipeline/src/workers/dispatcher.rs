//! Visualization dispatcher
//!
//! One step renders at most one frame and returns how long to wait before
//! the next step. The mode is re-read on every step, so a button press is
//! picked up within one frame of whatever view is showing, including the
//! game.
//!
//! ```text
//!            splash             mode changed
//!  Browse ───────────▶ Splash ──────────────▶ Browse
//!    │
//!    │ snake            mode changed / game over        mode changed
//!    └──────▶ Playing ───────────────────────▶ Summary ─────────────▶ Browse
//! ```

use core::mem;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use tiltscope_core::config::PipelineConfig;
use tiltscope_core::gfx::Screen;
use tiltscope_core::mode::Mode;
use tiltscope_core::rng::XorShift32;
use tiltscope_core::sensor::SensorKind;
use tiltscope_core::snake::{FrameEvent, GameOutcome, SnakeGame};
use tiltscope_core::traits::{DisplayError, DisplaySink, DisplaySinkExt};
use tiltscope_core::views;

use crate::store::Store;

/// Where the dispatcher is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatcherState {
    /// Rendering live views, one per step
    Browse,
    /// Splash drawn; waiting for the mode to change
    Splash,
    /// A snake game is running
    Playing,
    /// Game summary shown; waiting for the mode to change
    Summary,
}

enum Phase {
    Browse,
    Splash,
    Playing(SnakeGame),
    Summary,
}

/// Outcome of one dispatcher step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Wait this long before the next step
    pub delay: Duration,
    /// Result of presenting the frame; `Ok` when nothing was drawn
    pub display: Result<(), DisplayError>,
}

/// Mode-driven renderer that owns the screen and the display
pub struct Dispatcher<'a, M: RawMutex, D: DisplaySink> {
    store: &'a Store<M>,
    display: D,
    screen: Screen,
    phase: Phase,
    config: PipelineConfig,
    rng: XorShift32,
}

impl<'a, M: RawMutex, D: DisplaySink> Dispatcher<'a, M, D> {
    pub fn new(store: &'a Store<M>, display: D, rng: XorShift32, config: &PipelineConfig) -> Self {
        Self {
            store,
            display,
            screen: Screen::new(),
            phase: Phase::Browse,
            config: *config,
            rng,
        }
    }

    pub fn state(&self) -> DispatcherState {
        match self.phase {
            Phase::Browse => DispatcherState::Browse,
            Phase::Splash => DispatcherState::Splash,
            Phase::Playing(_) => DispatcherState::Playing,
            Phase::Summary => DispatcherState::Summary,
        }
    }

    /// Last composed frame
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run one iteration
    pub async fn step(&mut self) -> Step {
        let mode = self.store.mode();
        let timing = self.config.timing;

        match mem::replace(&mut self.phase, Phase::Browse) {
            Phase::Browse => self.browse(mode).await,
            Phase::Splash => {
                if mode == Ok(Mode::Splash) {
                    self.phase = Phase::Splash;
                    Self::idle(timing.splash_poll_ms)
                } else {
                    Self::idle(timing.display_ms)
                }
            }
            Phase::Playing(game) => {
                if game.is_over() || mode != Ok(Mode::SnakeGame) {
                    self.end_game(game)
                } else {
                    self.play_frame(game).await
                }
            }
            Phase::Summary => {
                if mode == Ok(Mode::SnakeGame) {
                    self.phase = Phase::Summary;
                    Self::idle(timing.game_exit_poll_ms)
                } else {
                    Self::idle(timing.display_ms)
                }
            }
        }
    }

    async fn browse(&mut self, mode: Result<Mode, tiltscope_core::mode::InvalidMode>) -> Step {
        let timing = self.config.timing;
        let mode = match mode {
            Ok(mode) => mode,
            Err(_) => {
                self.screen.clear();
                views::invalid_mode(&mut self.screen);
                return self.present(timing.display_ms);
            }
        };

        match mode {
            Mode::Splash => {
                self.screen.clear();
                views::splash(&mut self.screen);
                self.phase = Phase::Splash;
                self.present(timing.splash_poll_ms)
            }
            Mode::SnakeGame => {
                let game = SnakeGame::new(self.config.snake, mem::take(&mut self.rng));
                self.play_frame(game).await
            }
            Mode::AccelNumeric | Mode::MagNumeric => {
                let kind = if mode == Mode::AccelNumeric {
                    SensorKind::Accel
                } else {
                    SensorKind::Mag
                };
                let snapshot = self.store.read_snapshot().await;
                self.screen.clear();
                views::numeric(&mut self.screen, kind, &snapshot);
                self.present(timing.display_ms)
            }
            Mode::AccelPlot | Mode::MagPlot => {
                let kind = if mode == Mode::AccelPlot {
                    SensorKind::Accel
                } else {
                    SensorKind::Mag
                };
                let traces = self.store.read_traces(kind).await;
                self.screen.clear();
                views::plot(&mut self.screen, kind, &traces, self.config.plot.range(kind));
                self.present(timing.display_ms)
            }
            Mode::Compass => {
                let mag = self.store.read_snapshot().await.mag;
                self.screen.clear();
                views::compass(&mut self.screen, mag);
                self.present(timing.display_ms)
            }
            Mode::LevelBubble => {
                let accel = self.store.read_snapshot().await.accel;
                self.screen.clear();
                views::level_bubble(&mut self.screen, accel);
                self.present(timing.display_ms)
            }
            Mode::TiltIndicator => {
                let accel = self.store.read_snapshot().await.accel;
                self.screen.clear();
                views::inclinometer(&mut self.screen, accel);
                self.present(timing.display_ms)
            }
        }
    }

    /// Steer, advance and draw one game frame
    async fn play_frame(&mut self, mut game: SnakeGame) -> Step {
        let accel = self.store.read_snapshot().await.accel;
        game.steer(accel);
        let _: FrameEvent = game.advance();

        self.screen.clear();
        game.render(&mut self.screen);
        let delay = game.frame_ms();
        self.phase = Phase::Playing(game);
        self.present(delay)
    }

    fn end_game(&mut self, game: SnakeGame) -> Step {
        let outcome = if game.is_over() {
            GameOutcome::GameOver
        } else {
            GameOutcome::Exited
        };
        self.screen.clear();
        game.render_summary(&mut self.screen, outcome);
        self.rng = game.into_rng();
        self.phase = Phase::Summary;
        self.present(self.config.timing.summary_hold_ms)
    }

    fn present(&mut self, delay_ms: u32) -> Step {
        Step {
            delay: Duration::from_millis(delay_ms as u64),
            display: self.display.present(&self.screen),
        }
    }

    fn idle(delay_ms: u32) -> Step {
        Step {
            delay: Duration::from_millis(delay_ms as u64),
            display: Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use tiltscope_core::gfx::BUFFER_LEN;
    use tiltscope_core::sensor::{SensorSnapshot, Vector3};
    use tiltscope_core::snake::Heading;

    /// Records the text drawn since the last flush
    #[derive(Default)]
    struct Panel {
        flushes: usize,
        text: std::string::String,
        fail: bool,
    }

    impl DisplaySink for Panel {
        fn flush(&mut self, _bitmap: &[u8; BUFFER_LEN]) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Bus);
            }
            self.flushes += 1;
            self.text.clear();
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            self.text.push('|');
            Ok(())
        }

        fn send_char(&mut self, c: u8) -> Result<(), DisplayError> {
            self.text.push(c as char);
            Ok(())
        }
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn dispatcher(store: &Store<NoopRawMutex>) -> Dispatcher<'_, NoopRawMutex, Panel> {
        Dispatcher::new(
            store,
            Panel::default(),
            XorShift32::new(7),
            &PipelineConfig::default(),
        )
    }

    #[test]
    fn test_splash_drawn_once_then_polled() {
        let store = Store::<NoopRawMutex>::new();
        let mut d = dispatcher(&store);

        let step = block_on(d.step());
        assert_eq!(step.delay, ms(50));
        assert_eq!(d.state(), DispatcherState::Splash);
        assert!(d.display().text.contains("TILTSCOPE"));

        for _ in 0..5 {
            assert_eq!(block_on(d.step()).delay, ms(50));
        }
        assert_eq!(d.display().flushes, 1);

        store.set_mode(Mode::AccelNumeric);
        assert_eq!(block_on(d.step()).delay, ms(100));
        assert_eq!(d.state(), DispatcherState::Browse);
        assert_eq!(d.display().flushes, 1);

        block_on(d.step());
        assert_eq!(d.display().flushes, 2);
        assert!(d.display().text.starts_with("|Acceleration"));
    }

    #[test]
    fn test_numeric_view_reads_latest_snapshot() {
        let store = Store::<NoopRawMutex>::new();
        store.set_mode(Mode::MagNumeric);
        block_on(store.publish_sensors(SensorSnapshot {
            accel: Vector3::ZERO,
            mag: Vector3::new(0.5, 0.25, -1.0),
            temperature: 21.5,
        }));
        let mut d = dispatcher(&store);

        let step = block_on(d.step());
        assert_eq!(step, Step { delay: ms(100), display: Ok(()) });
        assert_eq!(
            d.display().text,
            "|Magnetometer|X:0.50|Y:0.25|Z:-1.00|Temp:21.50C"
        );
    }

    #[test]
    fn test_every_live_mode_renders() {
        let store = Store::<NoopRawMutex>::new();
        let mut d = dispatcher(&store);
        for (mode, title) in [
            (Mode::AccelPlot, "Acceleration"),
            (Mode::MagPlot, "Magnetometer"),
            (Mode::Compass, "Compass"),
            (Mode::LevelBubble, "Level bubble"),
            (Mode::TiltIndicator, "Inclinometer"),
        ] {
            store.set_mode(mode);
            let step = block_on(d.step());
            assert_eq!(step.delay, ms(100));
            assert_eq!(d.state(), DispatcherState::Browse);
            assert_eq!(d.screen().text_at_row(0), Some(title));
        }
    }

    #[test]
    fn test_invalid_mode_placeholder() {
        let store = Store::<NoopRawMutex>::new();
        store.set_raw_mode(200);
        let mut d = dispatcher(&store);
        let step = block_on(d.step());
        assert_eq!(step.delay, ms(100));
        assert_eq!(d.display().text, "|Invalid Mode");
        assert_eq!(d.state(), DispatcherState::Browse);
    }

    #[test]
    fn test_display_error_reported_and_dispatcher_continues() {
        let store = Store::<NoopRawMutex>::new();
        store.set_mode(Mode::Compass);
        let mut d = dispatcher(&store);
        d.display.fail = true;
        assert_eq!(block_on(d.step()).display, Err(DisplayError::Bus));
        d.display.fail = false;
        assert_eq!(block_on(d.step()).display, Ok(()));
    }

    #[test]
    fn test_game_exit_on_mode_change() {
        let store = Store::<NoopRawMutex>::new();
        store.set_mode(Mode::SnakeGame);
        let mut d = dispatcher(&store);

        let step = block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Playing);
        assert_eq!(step.delay, ms(300));
        assert!(d.display().text.starts_with("|Snake: 0"));

        block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Playing);

        store.set_mode(Mode::Splash);
        let step = block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Summary);
        assert_eq!(step.delay, ms(1000));
        assert_eq!(d.display().text, "|Snake|Exit game|Score: 0");

        let step = block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Browse);
        assert_eq!(step.delay, ms(100));

        block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Splash);
    }

    #[test]
    fn test_summary_waits_while_mode_unchanged() {
        let store = Store::<NoopRawMutex>::new();
        store.set_mode(Mode::SnakeGame);
        let mut d = dispatcher(&store);
        block_on(d.step());

        store.set_raw_mode(99);
        block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Summary);

        store.set_mode(Mode::SnakeGame);
        for _ in 0..3 {
            assert_eq!(block_on(d.step()).delay, ms(100));
            assert_eq!(d.state(), DispatcherState::Summary);
        }
    }

    #[test]
    fn test_game_over_shows_summary() {
        let store = Store::<NoopRawMutex>::new();
        store.set_mode(Mode::SnakeGame);
        let mut d = dispatcher(&store);
        let tilt = |x: f32, y: f32| {
            block_on(store.publish_sensors(SensorSnapshot {
                accel: Vector3::new(x, y, 9.8),
                ..SensorSnapshot::ZERO
            }));
        };

        // Sweep the board row by row, eating whatever food is found, until
        // the snake is long enough to bite itself
        let mut frame = 0;
        loop {
            if let Phase::Playing(game) = &d.phase {
                if game.body().len() >= 5 && game.heading() == Heading::Right {
                    break;
                }
            }
            if frame % 16 == 15 {
                tilt(0.0, -1.0);
            } else {
                tilt(1.0, 0.0);
            }
            block_on(d.step());
            frame += 1;
            assert!(frame < 5_000, "snake never grew");
        }

        // Up, left, down: the head lands on its own body
        for (x, y) in [(0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
            tilt(x, y);
            block_on(d.step());
        }
        match &d.phase {
            Phase::Playing(game) => assert!(game.is_over()),
            _ => panic!("game ended early"),
        }

        let step = block_on(d.step());
        assert_eq!(d.state(), DispatcherState::Summary);
        assert_eq!(step.delay, ms(1000));
        assert!(d.display().text.starts_with("|Snake|Game Over|Score: "));
    }
}
