//! Small seedable pseudo-random generator
//!
//! Used for snake food placement and LED colours, where speed and a tiny
//! state matter more than statistical quality.

/// Marsaglia xorshift32
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Seed used in place of zero, which would lock the generator at zero
    const FALLBACK_SEED: u32 = 0x2545_F491;

    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `0..max`; 0 when `max` is 0
    pub fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(Self::FALLBACK_SEED)
    }
}
