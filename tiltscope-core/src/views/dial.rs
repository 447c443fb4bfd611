//! Orientation views: compass, level bubble and inclinometer

use core::f32::consts::PI;

use crate::gfx::{Screen, HEIGHT, WIDTH};
use crate::orientation::{heading, Attitude};
use crate::sensor::Vector3;

const W: i32 = WIDTH as i32;
const H: i32 = HEIGHT as i32;

pub const COMPASS_CENTER: (i32, i32) = (W / 2, H / 2 + 3);
pub const COMPASS_RADIUS: i32 = 10;

/// Level frame as (x, y, w, h)
pub const LEVEL_RECT: (i32, i32, i32, i32) = (10, 10, W - 20, H - 20);

/// Radius of the level bubble and the inclinometer marker
pub const MARKER_RADIUS: i32 = 3;

/// Compass rose with a needle pointing along the heading
pub fn compass(screen: &mut Screen, mag: Vector3) {
    let (cx, cy) = COMPASS_CENTER;
    let r = COMPASS_RADIUS;
    let theta = heading(mag) * PI / 180.0;
    let needle_x = cx + (r as f32 * libm::sinf(theta)) as i32;
    let needle_y = cy - (r as f32 * libm::cosf(theta)) as i32;

    let fb = screen.fb();
    fb.circle(cx, cy, r);
    fb.line(cx, cy, needle_x, needle_y);

    screen.text(0, 0, "Compass");
    screen.text((cx - 3) as u8, 1, "N");
    screen.text((cx + r + 2) as u8, 3, "E");
    screen.text((cx - 3) as u8, 5, "S");
    screen.text((cx - r - 8) as u8, 3, "W");
}

/// Bubble that drifts against the tilt, held inside the frame
pub fn level_bubble(screen: &mut Screen, accel: Vector3) {
    let att = Attitude::from_accel(accel);
    let (x, y, w, h) = LEVEL_RECT;
    let half_w = (w / 2) as f32;
    let half_h = (h / 2) as f32;

    let bubble_x = (x + w / 2 - (att.roll * half_w / 45.0) as i32).clamp(x, x + w);
    let bubble_y = (y + h / 2 + (att.pitch * half_h / 45.0) as i32).clamp(y, y + h);

    let fb = screen.fb();
    fb.rectangle(x, y, w, h);
    fb.circle(bubble_x, bubble_y, MARKER_RADIUS);

    screen.text(0, 0, "Level bubble");
}

/// Crosshair with a marker offset by roll and pitch
pub fn inclinometer(screen: &mut Screen, accel: Vector3) {
    let att = Attitude::from_accel(accel);
    let (cx, cy) = (W / 2, H / 2);
    let marker_x = cx + (att.roll * W as f32 / 90.0) as i32;
    let marker_y = cy - (att.pitch * H as f32 / 90.0) as i32;

    let fb = screen.fb();
    fb.line(0, cy, W - 1, cy);
    fb.line(cx, 0, cx, H - 1);
    fb.circle(marker_x, marker_y, MARKER_RADIUS);

    screen.text(0, 0, "Inclinometer");
    screen.text_fmt(0, 4, format_args!("P:{:.1}", att.pitch));
    screen.text_fmt(0, 5, format_args!("R:{:.1}", att.roll));
}
