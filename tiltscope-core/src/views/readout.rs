//! Numeric readout view

use crate::gfx::Screen;
use crate::sensor::{SensorKind, SensorSnapshot};

/// Title, the three axes with two decimals, then the die temperature
pub fn numeric(screen: &mut Screen, kind: SensorKind, snapshot: &SensorSnapshot) {
    let v = snapshot.vector(kind);
    screen.text(0, 0, kind.title());
    screen.text_fmt(0, 1, format_args!("X:{:.2}", v.x));
    screen.text_fmt(0, 2, format_args!("Y:{:.2}", v.y));
    screen.text_fmt(0, 3, format_args!("Z:{:.2}", v.z));
    screen.text_fmt(0, 5, format_args!("Temp:{:.2}C", snapshot.temperature));
}
