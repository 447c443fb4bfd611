//! Display task
//!
//! Drives the visualization dispatcher: every step renders at most one frame
//! to the Nokia 5110 and says how long to wait before the next one.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

use tiltscope_core::config::PipelineConfig;
use tiltscope_core::rng::XorShift32;
use tiltscope_drivers::Pcd8544;
use tiltscope_pipeline::workers::Dispatcher;

use crate::channels::STORE;

/// PCD8544 on SPI0 with its own chip select
pub type Lcd = Pcd8544<
    ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>,
    Output<'static>,
    Output<'static>,
>;

#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, rng: XorShift32, config: PipelineConfig) {
    info!("Display task started");

    if let Err(e) = lcd.init(&mut Delay) {
        error!("Display init failed: {:?}", e);
        return;
    }
    info!("PCD8544 initialized");

    let mut dispatcher = Dispatcher::new(&STORE, lcd, rng, &config);
    let mut state = dispatcher.state();

    loop {
        let step = dispatcher.step().await;
        if let Err(e) = step.display {
            warn!("Display update failed: {:?}", e);
        }

        let next = dispatcher.state();
        if next != state {
            debug!("Dispatcher {:?} -> {:?}", state, next);
            state = next;
        }

        Timer::after(step.delay).await;
    }
}
