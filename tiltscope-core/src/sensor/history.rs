//! Fixed-length sample history for the plot views

use super::{SensorKind, SensorSnapshot, Vector3};
use crate::gfx::WIDTH;

/// One sample per display column
pub const HISTORY_LEN: usize = WIDTH;

/// Fixed-capacity, oldest-first sample sequence
///
/// Every push discards the oldest sample and appends the newest at the end,
/// so the buffer is always full. Before `N` pushes the leading slots hold the
/// initial zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer<const N: usize> {
    values: [f32; N],
    /// Number of pushed samples still retained (saturates at N)
    filled: usize,
}

impl<const N: usize> Default for RollingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RollingBuffer<N> {
    pub const fn new() -> Self {
        Self {
            values: [0.0; N],
            filled: 0,
        }
    }

    /// Shift everything one slot toward the front and append `value`
    pub fn push(&mut self, value: f32) {
        if N == 0 {
            return;
        }
        self.values.copy_within(1.., 0);
        self.values[N - 1] = value;
        if self.filled < N {
            self.filled += 1;
        }
    }

    /// All N slots, oldest first
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Only the pushed samples still retained, oldest first
    pub fn recent(&self) -> &[f32] {
        &self.values[N - self.filled..]
    }

    /// Sample at a slot index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<f32> {
        if self.filled == 0 {
            None
        } else {
            self.values.last().copied()
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

/// The three axis histories of one sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisTraces {
    pub x: RollingBuffer<HISTORY_LEN>,
    pub y: RollingBuffer<HISTORY_LEN>,
    pub z: RollingBuffer<HISTORY_LEN>,
}

impl AxisTraces {
    pub const fn new() -> Self {
        Self {
            x: RollingBuffer::new(),
            y: RollingBuffer::new(),
            z: RollingBuffer::new(),
        }
    }

    fn push(&mut self, v: Vector3) {
        self.x.push(v.x);
        self.y.push(v.y);
        self.z.push(v.z);
    }
}

/// Six independent histories, one per axis per sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotHistory {
    pub accel: AxisTraces,
    pub mag: AxisTraces,
}

impl PlotHistory {
    pub const fn new() -> Self {
        Self {
            accel: AxisTraces::new(),
            mag: AxisTraces::new(),
        }
    }

    /// Append every axis of a snapshot
    pub fn push(&mut self, snapshot: &SensorSnapshot) {
        self.accel.push(snapshot.accel);
        self.mag.push(snapshot.mag);
    }

    /// Traces of one sensor
    pub fn traces(&self, kind: SensorKind) -> &AxisTraces {
        match kind {
            SensorKind::Accel => &self.accel,
            SensorKind::Mag => &self.mag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_shifts_left() {
        let mut buf = RollingBuffer::<4>::new();
        buf.push(1.0);
        buf.push(2.0);
        assert_eq!(buf.as_slice(), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(buf.recent(), &[1.0, 2.0]);
        assert_eq!(buf.latest(), Some(2.0));
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut buf = RollingBuffer::<3>::new();
        for v in 1..=5 {
            buf.push(v as f32);
        }
        assert_eq!(buf.as_slice(), &[3.0, 4.0, 5.0]);
        assert_eq!(buf.recent(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_empty() {
        let buf = RollingBuffer::<3>::new();
        assert!(buf.recent().is_empty());
        assert_eq!(buf.latest(), None);
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn test_history_axes_are_independent() {
        let mut history = PlotHistory::new();
        history.push(&SensorSnapshot {
            accel: Vector3::new(1.0, 2.0, 3.0),
            mag: Vector3::new(-1.0, -2.0, -3.0),
            temperature: 0.0,
        });
        assert_eq!(history.accel.y.latest(), Some(2.0));
        assert_eq!(history.mag.z.latest(), Some(-3.0));
        assert_eq!(history.traces(SensorKind::Mag).x.latest(), Some(-1.0));
        assert_eq!(history.accel.x.as_slice().len(), HISTORY_LEN);
    }

    proptest! {
        #[test]
        fn prop_retains_last_values_in_order(values in proptest::collection::vec(-100.0f32..100.0, 0..200)) {
            let mut buf = RollingBuffer::<HISTORY_LEN>::new();
            for v in &values {
                buf.push(*v);
            }
            let keep = values.len().min(HISTORY_LEN);
            prop_assert_eq!(buf.recent(), &values[values.len() - keep..]);
        }
    }
}
