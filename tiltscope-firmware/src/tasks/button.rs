//! Mode button task
//!
//! The button pulls the pin high when pressed. Each debounced press steps
//! the display to the next mode.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use crate::channels::STORE;

/// Settle time before re-sampling the pin
const DEBOUNCE: Duration = Duration::from_millis(15);

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_rising_edge().await;
        Timer::after(DEBOUNCE).await;

        if button.is_high() {
            let mode = STORE.advance_mode();
            info!("Mode: {:?}", mode);
        }
    }
}
