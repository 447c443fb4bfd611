//! Gesture flag bus
//!
//! Flags accumulate in an atomic bitset until they are cleared as a whole.
//! A wake signal lets one task sleep until a flag of interest appears.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU8, Ordering};

use tiltscope_core::gesture::GestureFlags;

/// Bitset of pending gestures with a single waiter
pub struct GestureBus<M: RawMutex> {
    pending: AtomicU8,
    wake: Signal<M, ()>,
}

impl<M: RawMutex> Default for GestureBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> GestureBus<M> {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(0),
            wake: Signal::new(),
        }
    }

    /// OR `flags` into the pending set and wake the waiter
    pub fn raise(&self, flags: GestureFlags) {
        if flags.is_empty() {
            return;
        }
        self.pending.fetch_or(flags.bits(), Ordering::AcqRel);
        self.wake.signal(());
    }

    /// Current pending set, without waiting
    pub fn pending(&self) -> GestureFlags {
        GestureFlags::from_bits(self.pending.load(Ordering::Acquire))
    }

    /// Wait until any flag in `mask` is pending, then return the whole set
    ///
    /// The set is not cleared; call [`clear`](Self::clear) once it has been
    /// acted on. Only one task may wait at a time.
    pub async fn wait_any(&self, mask: GestureFlags) -> GestureFlags {
        loop {
            let current = self.pending();
            if current.intersects(mask) {
                return current;
            }
            self.wake.wait().await;
        }
    }

    /// Drop every pending flag
    pub fn clear(&self) {
        self.pending.store(0, Ordering::Release);
        self.wake.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::pin::pin;
    use core::task::Poll;

    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_raise_accumulates() {
        let bus = GestureBus::<NoopRawMutex>::new();
        bus.raise(GestureFlags::TILT);
        bus.raise(GestureFlags::FLIP);
        assert_eq!(bus.pending(), GestureFlags::TILT | GestureFlags::FLIP);
    }

    #[test]
    fn test_wait_returns_whole_set() {
        let bus = GestureBus::<NoopRawMutex>::new();
        bus.raise(GestureFlags::SHAKE | GestureFlags::FLIP);
        let set = block_on(bus.wait_any(GestureFlags::FLIP));
        assert_eq!(set, GestureFlags::SHAKE | GestureFlags::FLIP);
        // waiting does not consume
        assert_eq!(bus.pending(), set);
    }

    #[test]
    fn test_clear() {
        let bus = GestureBus::<NoopRawMutex>::new();
        bus.raise(GestureFlags::ALL);
        bus.clear();
        assert!(bus.pending().is_empty());
    }

    #[test]
    fn test_wait_blocks_until_masked_flag() {
        let bus = GestureBus::<NoopRawMutex>::new();
        let mut wait = pin!(bus.wait_any(GestureFlags::SHAKE));

        assert!(poll_once(wait.as_mut()).is_pending());
        bus.raise(GestureFlags::TILT);
        assert!(poll_once(wait.as_mut()).is_pending());
        bus.raise(GestureFlags::SHAKE);
        assert_eq!(
            poll_once(wait.as_mut()),
            Poll::Ready(GestureFlags::SHAKE | GestureFlags::TILT)
        );
    }
}
