//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the display core
//! needs from a chip HAL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumen-drivers (ST7789 driver)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eh1 adapters → any embedded-hal 1.0    │
//! │  chip HAL (embassy-rp, esp-hal, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Reset, data/command and chip-select lines
//! - [`spi::SpiBus`] - Write-only serial bus to the display controller
//! - [`delay::DelayMs`] - Blocking millisecond delays for reset/init timing

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
#[cfg(feature = "embedded-hal")]
pub mod eh1;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::DelayMs;
pub use gpio::{NoPin, OutputPin};
pub use spi::SpiBus;
