//! Screen composition
//!
//! A [`Screen`] is what one render pass produces: the bitmap plus the text
//! written on top of it. Text is not rasterized into the framebuffer; the
//! display controller draws glyphs itself after the bitmap has been flushed,
//! so labels are kept as a list of positioned strings.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use super::framebuffer::{Framebuffer, BANKS, WIDTH};

/// Maximum characters in one text item
pub const TEXT_LEN: usize = 16;

/// Maximum text items per screen
pub const MAX_TEXT_ITEMS: usize = 10;

/// A string anchored at a pixel column and bank row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextItem {
    /// Pixel column (0-83)
    pub col: u8,
    /// Bank row (0-5)
    pub row: u8,
    /// ASCII text
    pub text: String<TEXT_LEN>,
}

/// Bitmap plus text overlay for one frame
#[derive(Debug, Clone, Default)]
pub struct Screen {
    framebuffer: Framebuffer,
    text: Vec<TextItem, MAX_TEXT_ITEMS>,
}

impl Screen {
    /// Create an empty screen
    pub const fn new() -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            text: Vec::new(),
        }
    }

    /// Erase bitmap and text
    pub fn clear(&mut self) {
        self.framebuffer.clear();
        self.text.clear();
    }

    /// Bitmap for drawing
    pub fn fb(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Bitmap for reading
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Place text at a pixel column and bank row
    ///
    /// Off-screen positions are dropped, long strings are truncated, and
    /// items beyond [`MAX_TEXT_ITEMS`] are ignored.
    pub fn text(&mut self, col: u8, row: u8, text: &str) {
        if col as usize >= WIDTH || row as usize >= BANKS {
            return;
        }
        let mut s = String::new();
        for ch in text.chars().take(TEXT_LEN) {
            let _ = s.push(ch);
        }
        let _ = self.text.push(TextItem { col, row, text: s });
    }

    /// Place formatted text, e.g. `screen.text_fmt(0, 1, format_args!("X:{:.2}", x))`
    ///
    /// Output past [`TEXT_LEN`] characters is cut off.
    pub fn text_fmt(&mut self, col: u8, row: u8, args: fmt::Arguments<'_>) {
        let mut s: String<TEXT_LEN> = String::new();
        let _ = s.write_fmt(args);
        self.text(col, row, &s);
    }

    /// Text items in the order they were placed
    pub fn text_items(&self) -> &[TextItem] {
        &self.text
    }

    /// Find the text placed at a given row, if any (first match)
    pub fn text_at_row(&self, row: u8) -> Option<&str> {
        self.text
            .iter()
            .find(|item| item.row == row)
            .map(|item| item.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_placement() {
        let mut screen = Screen::new();
        screen.text(0, 0, "Compass");
        screen.text(39, 1, "N");
        assert_eq!(screen.text_items().len(), 2);
        assert_eq!(screen.text_at_row(1), Some("N"));
        assert_eq!(screen.text_items()[1].col, 39);
    }

    #[test]
    fn test_text_offscreen_dropped() {
        let mut screen = Screen::new();
        screen.text(84, 0, "x");
        screen.text(0, 6, "y");
        assert!(screen.text_items().is_empty());
    }

    #[test]
    fn test_text_truncated() {
        let mut screen = Screen::new();
        screen.text(0, 0, "0123456789abcdefXYZ");
        assert_eq!(screen.text_at_row(0), Some("0123456789abcdef"));
    }

    #[test]
    fn test_text_fmt() {
        let mut screen = Screen::new();
        screen.text_fmt(0, 5, format_args!("Temp:{:.2}C", 23.456f32));
        assert_eq!(screen.text_at_row(5), Some("Temp:23.46C"));
    }

    #[test]
    fn test_clear_resets_both_layers() {
        let mut screen = Screen::new();
        screen.fb().set_pixel(1, 1);
        screen.text(0, 0, "hi");
        screen.clear();
        assert_eq!(screen.framebuffer().lit_pixels(), 0);
        assert!(screen.text_items().is_empty());
    }
}
