//! PCD8544 (Nokia 5110) LCD driver
//!
//! 84x48 monochrome controller on a write-only SPI bus. The D/C pin selects
//! whether a byte is an instruction (low) or display RAM data (high). RAM is
//! organised as six banks of 8 vertical pixels; the address auto-increments
//! along X and wraps into the next bank.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use tiltscope_core::gfx::{BANKS, BUFFER_LEN, WIDTH};
use tiltscope_core::traits::{DisplayError, DisplaySink};

use crate::font::{glyph, GLYPH_WIDTH};

/// PCD8544 instructions
pub mod cmd {
    /// Function set, extended instruction set
    pub const EXTENDED: u8 = 0x21;
    /// Function set, basic instruction set
    pub const BASIC: u8 = 0x20;
    /// Set Vop (extended set), OR'd with a 7-bit contrast
    pub const SET_VOP: u8 = 0x80;
    /// Temperature coefficient (extended set), OR'd with 0-3
    pub const TEMP_COEFF: u8 = 0x04;
    /// Bias system (extended set), OR'd with 0-7
    pub const BIAS: u8 = 0x10;
    /// Display control: normal mode
    pub const DISPLAY_NORMAL: u8 = 0x0C;
    /// Set X address, OR'd with the column
    pub const SET_X: u8 = 0x80;
    /// Set Y address, OR'd with the bank
    pub const SET_Y: u8 = 0x40;
}

/// Reset pulse width
const RESET_PULSE_MS: u32 = 10;

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pcd8544Config {
    /// Operating voltage setting (0-127)
    pub contrast: u8,
    /// Temperature coefficient (0-3)
    pub temp_coeff: u8,
    /// Bias system; 4 selects 1:48 multiplex
    pub bias: u8,
}

impl Default for Pcd8544Config {
    fn default() -> Self {
        Self {
            contrast: 0x31,
            temp_coeff: 0,
            bias: 4,
        }
    }
}

/// Nokia 5110 display
pub struct Pcd8544<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    config: Pcd8544Config,
}

impl<SPI, DC, RST> Pcd8544<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, config: Pcd8544Config) -> Self {
        Self {
            spi,
            dc,
            rst,
            config,
        }
    }

    /// Pulse reset and load the configuration
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;

        let init_cmds = [
            cmd::EXTENDED,
            cmd::SET_VOP | (self.config.contrast & 0x7F),
            cmd::TEMP_COEFF | (self.config.temp_coeff & 0x03),
            cmd::BIAS | (self.config.bias & 0x07),
            cmd::BASIC,
            cmd::DISPLAY_NORMAL,
        ];
        for c in init_cmds {
            self.command(c)?;
        }
        Ok(())
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.spi.write(&[c]).map_err(|_| DisplayError::Bus)
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::Pin)?;
        self.spi.write(bytes).map_err(|_| DisplayError::Bus)
    }
}

impl<SPI, DC, RST> DisplaySink for Pcd8544<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn flush(&mut self, bitmap: &[u8; BUFFER_LEN]) -> Result<(), DisplayError> {
        self.set_cursor(0, 0)?;
        self.data(bitmap)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        // Out-of-range addresses are clipped to the last column/bank
        let col = col.min(WIDTH as u8 - 1);
        let row = row.min(BANKS as u8 - 1);
        self.command(cmd::SET_X | col)?;
        self.command(cmd::SET_Y | row)
    }

    fn send_char(&mut self, c: u8) -> Result<(), DisplayError> {
        // Blank column on each side of the glyph
        let mut columns = [0u8; GLYPH_WIDTH + 2];
        columns[1..=GLYPH_WIDTH].copy_from_slice(glyph(c));
        self.data(&columns)
    }
}
