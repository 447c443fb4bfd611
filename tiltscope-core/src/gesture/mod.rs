//! Gesture detection
//!
//! A snapshot's acceleration is classified into at most one [`Gesture`] by
//! an ordered rule list ([`rules`]). Detected gestures are posted on a flag
//! bus as [`GestureFlags`], where they accumulate until the actuation loop
//! consumes the whole set at once.

pub mod rules;

pub use rules::{classify, GestureRule, GESTURE_RULES};

/// Gesture detected from one acceleration sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Acceleration magnitude above the shake threshold
    Shake,
    /// X or Y acceleration beyond the tilt threshold
    Tilt,
    /// Z acceleration below the flip threshold (board upside down)
    Flip,
}

impl Gesture {
    /// Flag bit for this gesture
    pub const fn flag(self) -> GestureFlags {
        match self {
            Gesture::Shake => GestureFlags::SHAKE,
            Gesture::Tilt => GestureFlags::TILT,
            Gesture::Flip => GestureFlags::FLIP,
        }
    }
}

/// Set of pending gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureFlags(u8);

impl GestureFlags {
    pub const NONE: Self = Self(0);
    pub const SHAKE: Self = Self(1 << 0);
    pub const TILT: Self = Self(1 << 1);
    pub const FLIP: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::SHAKE.0 | Self::TILT.0 | Self::FLIP.0);

    /// Build from raw bits; unknown bits are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any flag in `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Gestures present in this set, in rule priority order
    pub fn iter(self) -> impl Iterator<Item = Gesture> {
        [Gesture::Shake, Gesture::Tilt, Gesture::Flip]
            .into_iter()
            .filter(move |g| self.contains(g.flag()))
    }
}

impl From<Gesture> for GestureFlags {
    fn from(gesture: Gesture) -> Self {
        gesture.flag()
    }
}

impl core::ops::BitOr for GestureFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        assert_eq!(GestureFlags::SHAKE.bits(), 0b001);
        assert_eq!(GestureFlags::TILT.bits(), 0b010);
        assert_eq!(GestureFlags::FLIP.bits(), 0b100);
        assert_eq!(GestureFlags::ALL.bits(), 0b111);
    }

    #[test]
    fn test_from_bits_masks_unknown() {
        assert_eq!(GestureFlags::from_bits(0xFF), GestureFlags::ALL);
        assert!(GestureFlags::from_bits(0b1000).is_empty());
    }

    #[test]
    fn test_set_operations() {
        let set = GestureFlags::SHAKE | GestureFlags::FLIP;
        assert!(set.contains(GestureFlags::SHAKE));
        assert!(!set.contains(GestureFlags::TILT));
        assert!(set.intersects(GestureFlags::ALL));
        assert!(!set.intersects(GestureFlags::TILT));
        assert_eq!(set.intersection(GestureFlags::FLIP), GestureFlags::FLIP);
    }

    #[test]
    fn test_iter_in_priority_order() {
        let set = GestureFlags::FLIP | GestureFlags::SHAKE;
        let mut it = set.iter();
        assert_eq!(it.next(), Some(Gesture::Shake));
        assert_eq!(it.next(), Some(Gesture::Flip));
        assert_eq!(it.next(), None);
    }
}
