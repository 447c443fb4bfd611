//! Scrolling three-lane plot view
//!
//! The rolling history holds one sample per display column, so sample `i`
//! is drawn at column `i`; the polyline starts from sample 0 at the first
//! trace column. The three axes share one value range and are
//! separated by fixed lane offsets; at a value of zero each trace sits on
//! its reference tick.

use crate::config::PlotRange;
use crate::gfx::{map_value_to_pixel, Screen, HEIGHT, WIDTH};
use crate::sensor::{AxisTraces, SensorKind};

const H: i32 = HEIGHT as i32;

/// First column of the traces, right of the axis
pub const TRACE_START_X: i32 = 11;

/// Column of the vertical axis
pub const AXIS_X: i32 = 8;

/// Rows of the short reference ticks, one per lane
pub const TICK_ROWS: [i32; 3] = [3 * H / 12, 7 * H / 12, 11 * H / 12];

/// Vertical shift of the X, Y and Z lanes
pub const LANE_OFFSETS: [i32; 3] = [-3 * H / 12, H / 12, 5 * H / 12];

/// Title, axis, ticks, lane labels and one polyline per axis
pub fn plot(screen: &mut Screen, kind: SensorKind, traces: &AxisTraces, range: PlotRange) {
    let fb = screen.fb();

    for row in TICK_ROWS {
        fb.line(AXIS_X - 1, row, AXIS_X + 1, row);
    }
    fb.line(AXIS_X, 0, AXIS_X, H - 1);

    let lanes = [
        traces.x.as_slice(),
        traces.y.as_slice(),
        traces.z.as_slice(),
    ];
    for (samples, offset) in lanes.into_iter().zip(LANE_OFFSETS) {
        let row_at = |col: i32| {
            let value = samples.get(col as usize).copied().unwrap_or(0.0);
            map_value_to_pixel(value, range.min, range.max) + offset
        };
        // The first segment rises from the oldest sample at the trace origin
        let mut prev = (TRACE_START_X, row_at(0));
        for col in TRACE_START_X..WIDTH as i32 {
            let point = (col, row_at(col));
            fb.line(prev.0, prev.1, point.0, point.1);
            prev = point;
        }
    }

    screen.text(0, 0, kind.title());
    screen.text(0, 1, "X");
    screen.text(0, 3, "Y");
    screen.text(0, 5, "Z");
}
