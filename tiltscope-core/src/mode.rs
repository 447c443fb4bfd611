//! Visualization modes
//!
//! The mode is stored as a raw index so it can live in a lock-free atomic.
//! Any index outside the enumeration decodes to an error and is shown as an
//! "Invalid Mode" placeholder rather than crashing the display loop.

/// Which view the display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    #[default]
    Splash = 0,
    AccelNumeric = 1,
    AccelPlot = 2,
    MagNumeric = 3,
    MagPlot = 4,
    Compass = 5,
    LevelBubble = 6,
    TiltIndicator = 7,
    SnakeGame = 8,
}

/// Raw mode index that does not name a [`Mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidMode(pub u8);

impl Mode {
    /// Number of modes in the cycle
    pub const COUNT: u8 = 9;

    /// All modes in button order
    pub const ALL: [Mode; Mode::COUNT as usize] = [
        Mode::Splash,
        Mode::AccelNumeric,
        Mode::AccelPlot,
        Mode::MagNumeric,
        Mode::MagPlot,
        Mode::Compass,
        Mode::LevelBubble,
        Mode::TiltIndicator,
        Mode::SnakeGame,
    ];

    /// Raw index
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Next mode in button order, wrapping back to the splash screen
    pub fn next(self) -> Mode {
        Mode::ALL[((self.index() + 1) % Mode::COUNT) as usize]
    }

    /// Short name for logs
    pub fn name(self) -> &'static str {
        match self {
            Mode::Splash => "splash",
            Mode::AccelNumeric => "accel",
            Mode::AccelPlot => "accel-plot",
            Mode::MagNumeric => "mag",
            Mode::MagPlot => "mag-plot",
            Mode::Compass => "compass",
            Mode::LevelBubble => "level",
            Mode::TiltIndicator => "tilt",
            Mode::SnakeGame => "snake",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = InvalidMode;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Mode::ALL.get(raw as usize).copied().ok_or(InvalidMode(raw))
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_modes() {
        for mode in Mode::ALL {
            assert_eq!(Mode::try_from(mode.index()), Ok(mode));
        }
    }

    #[test]
    fn test_invalid_index() {
        assert_eq!(Mode::try_from(9), Err(InvalidMode(9)));
        assert_eq!(Mode::try_from(255), Err(InvalidMode(255)));
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Mode::Splash.next(), Mode::AccelNumeric);
        assert_eq!(Mode::TiltIndicator.next(), Mode::SnakeGame);
        assert_eq!(Mode::SnakeGame.next(), Mode::Splash);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut mode = Mode::Compass;
        for _ in 0..Mode::COUNT {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Compass);
    }
}
