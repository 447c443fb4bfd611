//! Splash title card and the invalid-mode placeholder

use crate::gfx::{Screen, HEIGHT, WIDTH};

const W: i32 = WIDTH as i32;
const H: i32 = HEIGHT as i32;

/// Double frame with the product name and a hint
pub fn splash(screen: &mut Screen) {
    let fb = screen.fb();
    fb.rectangle(0, 0, W - 1, H - 1);
    fb.rectangle(2, 2, W - 5, H - 5);
    fb.line(10, 26, W - 11, 26);

    screen.text(10, 2, "TILTSCOPE");
    screen.text(10, 4, "press btn");
}

/// Shown when the stored mode index does not decode
pub fn invalid_mode(screen: &mut Screen) {
    screen.text(0, 0, "Invalid Mode");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_frame_on_edges() {
        let mut screen = Screen::new();
        splash(&mut screen);
        let fb = screen.framebuffer();
        assert!(fb.is_set(0, 0) && fb.is_set(W - 1, H - 1));
        assert!(fb.is_set(2, 2) && fb.is_set(W - 3, H - 3));
        assert!(!fb.is_set(1, 1));
        assert_eq!(screen.text_at_row(2), Some("TILTSCOPE"));
    }

    #[test]
    fn test_invalid_mode_placeholder() {
        let mut screen = Screen::new();
        invalid_mode(&mut screen);
        assert_eq!(screen.text_at_row(0), Some("Invalid Mode"));
        assert_eq!(screen.framebuffer().lit_pixels(), 0);
    }
}
