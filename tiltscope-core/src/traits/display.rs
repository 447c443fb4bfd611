//! Display sink trait for the 84×48 monochrome panel

use crate::gfx::{Screen, BUFFER_LEN};

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer failed
    Bus,
    /// Data/command or reset pin could not be driven
    Pin,
}

/// Trait for the display controller
///
/// The panel is written in banks of 8 vertical pixels. Text is drawn by the
/// controller's own font, one glyph at a time at the current cursor.
pub trait DisplaySink {
    /// Write a whole packed bitmap starting at the top-left corner
    fn flush(&mut self, bitmap: &[u8; BUFFER_LEN]) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: pixel column (0-83)
    /// - `row`: bank (0-5)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Draw one ASCII character at the cursor and advance it
    fn send_char(&mut self, c: u8) -> Result<(), DisplayError>;
}

/// Helper trait for presenting a composed [`Screen`]
pub trait DisplaySinkExt: DisplaySink {
    /// Write `text` starting at the given cursor position
    fn draw_text(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        for c in text.bytes() {
            self.send_char(c)?;
        }
        Ok(())
    }

    /// Flush the bitmap, then draw the text overlay on top of it
    fn present(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        self.flush(screen.framebuffer().as_bytes())?;
        for item in screen.text_items() {
            self.draw_text(item.col, item.row, &item.text)?;
        }
        Ok(())
    }
}

impl<T: DisplaySink + ?Sized> DisplaySinkExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Flush(u32),
        Cursor(u8, u8),
        Char(u8),
    }

    #[derive(Default)]
    struct Recorder {
        ops: std::vec::Vec<Op>,
    }

    impl DisplaySink for Recorder {
        fn flush(&mut self, bitmap: &[u8; BUFFER_LEN]) -> Result<(), DisplayError> {
            let lit = bitmap.iter().map(|b| b.count_ones()).sum();
            self.ops.push(Op::Flush(lit));
            Ok(())
        }

        fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
            self.ops.push(Op::Cursor(col, row));
            Ok(())
        }

        fn send_char(&mut self, c: u8) -> Result<(), DisplayError> {
            self.ops.push(Op::Char(c));
            Ok(())
        }
    }

    #[test]
    fn test_present_flushes_before_text() {
        let mut screen = Screen::new();
        screen.fb().set_pixel(1, 1);
        screen.text(0, 2, "Hi");

        let mut sink = Recorder::default();
        sink.present(&screen).unwrap();

        assert_eq!(
            sink.ops,
            [Op::Flush(1), Op::Cursor(0, 2), Op::Char(b'H'), Op::Char(b'i')]
        );
    }

    struct Broken;

    impl DisplaySink for Broken {
        fn flush(&mut self, _bitmap: &[u8; BUFFER_LEN]) -> Result<(), DisplayError> {
            Err(DisplayError::Bus)
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn send_char(&mut self, _c: u8) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    #[test]
    fn test_present_propagates_flush_error() {
        let screen = Screen::new();
        assert_eq!(Broken.present(&screen), Err(DisplayError::Bus));
    }
}
