//! Hardware driver implementations
//!
//! This crate provides the panel driver that pushes a
//! [`lumen_core::Screen`] to hardware:
//!
//! - ST7789 TFT controller over 4-wire SPI (command/data pin)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod st7789;

pub use st7789::{CommandBus, DriverError, DriverState, SpiInterface, St7789};
