//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tiltscope-core:
//!
//! - [`Fxos8700`]: accelerometer + magnetometer over async I²C ([`MotionSensor`])
//! - [`Pcd8544`]: Nokia 5110 LCD over SPI ([`DisplaySink`])
//! - [`PwmRgbLed`]: three PWM channels ([`RgbOutput`])
//!
//! [`MotionSensor`]: tiltscope_core::traits::MotionSensor
//! [`DisplaySink`]: tiltscope_core::traits::DisplaySink
//! [`RgbOutput`]: tiltscope_core::traits::RgbOutput

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod font;
pub mod fxos8700;
pub mod pcd8544;
pub mod rgb_led;

pub use fxos8700::Fxos8700;
pub use pcd8544::{Pcd8544, Pcd8544Config};
pub use rgb_led::{Polarity, PwmRgbLed};
