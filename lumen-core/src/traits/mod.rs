//! Hardware abstraction traits
//!
//! These traits define the interface between application code and the
//! panel driver that owns the framebuffer.

pub mod display;

pub use display::{Display, DisplayExt};
