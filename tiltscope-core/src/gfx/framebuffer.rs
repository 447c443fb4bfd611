//! Packed monochrome framebuffer
//!
//! The buffer layout matches the PCD8544 display RAM: one byte covers a
//! vertical strip of 8 pixels (a "bank"), banks are stored left to right,
//! top to bottom. Pixel (x, y) lives in byte `x + (y / 8) * WIDTH`, bit `y % 8`.
//!
//! All drawing is OR-only. The only way to erase is [`Framebuffer::clear`].

/// Display width in pixels
pub const WIDTH: usize = 84;

/// Display height in pixels
pub const HEIGHT: usize = 48;

/// Number of 8-row banks
pub const BANKS: usize = HEIGHT / 8;

/// Size of the packed bitmap in bytes
pub const BUFFER_LEN: usize = WIDTH * HEIGHT / 8;

/// 1 bit per pixel bitmap for the 84x48 display
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("lit", &self.lit_pixels())
            .finish()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }

    /// Zero the whole bitmap
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Raw packed bytes, in display RAM order
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    /// Check whether a pixel is lit. Out-of-bounds pixels read as unlit.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((index, bit)) => self.bytes[index] & (1 << bit) != 0,
            None => false,
        }
    }

    /// Number of lit pixels
    pub fn lit_pixels(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Byte index and bit position of a pixel, or None if off-screen
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / 8) * WIDTH, (y % 8) as u8))
    }

    /// Light a single pixel
    ///
    /// Coordinates outside the display are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if let Some((index, bit)) = Self::locate(x, y) {
            self.bytes[index] |= 1 << bit;
        }
    }

    /// Draw a line with integer Bresenham, both endpoints included
    ///
    /// Endpoints are walked in a canonical order so that (a, b) and (b, a)
    /// light exactly the same pixels.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a rectangle outline with corners at (x, y) and (x + w, y + h)
    pub fn rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.line(x, y, x + w, y);
        self.line(x + w, y, x + w, y + h);
        self.line(x + w, y + h, x, y + h);
        self.line(x, y + h, x, y);
    }

    /// Fill every pixel in [x, x + w) x [y, y + h)
    pub fn filled_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for px in x..x + w {
            for py in y..y + h {
                self.set_pixel(px, py);
            }
        }
    }

    /// Draw a circle outline using the midpoint algorithm
    pub fn circle(&mut self, cx: i32, cy: i32, r: i32) {
        let mut f = 1 - r;
        let mut ddf_x = 0;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.set_pixel(cx, cy + r);
        self.set_pixel(cx, cy - r);
        self.set_pixel(cx + r, cy);
        self.set_pixel(cx - r, cy);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x + 1;

            self.set_pixel(cx + x, cy + y);
            self.set_pixel(cx - x, cy + y);
            self.set_pixel(cx + x, cy - y);
            self.set_pixel(cx - x, cy - y);
            self.set_pixel(cx + y, cy + x);
            self.set_pixel(cx - y, cy + x);
            self.set_pixel(cx + y, cy - x);
            self.set_pixel(cx - y, cy - x);
        }
    }
}
