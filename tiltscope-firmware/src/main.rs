//! Tiltscope - Motion Sensor Visualizer Firmware
//!
//! Main firmware binary for RP2040 boards with an FXOS8700 motion sensor,
//! a Nokia 5110 (PCD8544) display, an RGB LED and a mode button.
//!
//! Board wiring (Raspberry Pi Pico):
//!
//! | signal | pin |
//! |--------|-----|
//! | FXOS8700 SDA / SCL | GPIO4 / GPIO5 (I2C0) |
//! | LCD SCK / MOSI / CS | GPIO18 / GPIO19 / GPIO17 (SPI0) |
//! | LCD D/C / RST / backlight | GPIO20 / GPIO21 / GPIO22 |
//! | LED red / green / blue | GPIO10 / GPIO11 / GPIO12 (PWM5 A/B, PWM6 A) |
//! | mode button (to 3V3) | GPIO15 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embedded_hal_bus::spi::ExclusiveDevice;
use rand_core::RngCore;
use {defmt_rtt as _, panic_probe as _};

use tiltscope_core::rng::XorShift32;
use tiltscope_drivers::{Fxos8700, Pcd8544, Pcd8544Config, Polarity, PwmRgbLed};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// PCD8544 maximum serial clock
const LCD_SPI_HZ: u32 = 4_000_000;

/// PWM wrap value; 125 MHz / 1000 = 125 kHz, well above flicker
const LED_PWM_TOP: u16 = 1000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tiltscope firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Ring oscillator jitter seeds snake food and LED colours
    let mut rosc = RoscRng;
    let led_rng = XorShift32::new(rosc.next_u32());
    let display_rng = XorShift32::new(rosc.next_u32());

    // Motion sensor on I2C0
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let sensor = Fxos8700::new(i2c);
    info!("I2C initialized for FXOS8700");

    // Nokia 5110 on SPI0 (write only)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap_or_else(|e| match e {});
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);
    let lcd = Pcd8544::new(spi_device, dc, rst, Pcd8544Config::default());

    // main never returns, so the backlight stays on
    let _backlight = Output::new(p.PIN_22, Level::High);
    info!("SPI initialized for PCD8544");

    // RGB LED on PWM slices 5 and 6
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = LED_PWM_TOP;
    let (red, green) =
        Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config.clone()).split();
    let (blue, _) = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config).split();

    // Mode button
    let button = Input::new(p.PIN_15, Pull::Down);

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::acquisition_task(sensor, config)));
    spawner.spawn(unwrap!(tasks::gesture_task(config)));
    spawner.spawn(unwrap!(tasks::logging_task(config)));
    spawner.spawn(unwrap!(tasks::display_task(lcd, display_rng, config)));
    spawner.spawn(unwrap!(tasks::button_task(button)));

    match (red, green, blue) {
        (Some(red), Some(green), Some(blue)) => {
            let led = PwmRgbLed::new(red, green, blue, Polarity::ActiveHigh);
            spawner.spawn(unwrap!(tasks::actuation_task(led, led_rng, config)));
        }
        _ => error!("LED PWM outputs unavailable, actuation disabled"),
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
