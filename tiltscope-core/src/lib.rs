//! Board-agnostic core logic for the tiltscope motion display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motion sensor, display, RGB output)
//! - 84×48 monochrome framebuffer and drawing primitives
//! - Sensor data model and rolling plot history
//! - Gesture classification and the LED actuation model
//! - View renderers and the snake game
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuation;
pub mod config;
pub mod gesture;
pub mod gfx;
pub mod mode;
pub mod orientation;
pub mod rng;
pub mod sensor;
pub mod snake;
pub mod traits;
pub mod views;
