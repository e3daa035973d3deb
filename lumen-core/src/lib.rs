//! Board-agnostic graphics core for the handheld display
//!
//! This crate contains everything that draws pixels without touching
//! hardware:
//!
//! - Palette and pixel formats (RGB565, 4-bit indexed)
//! - Canvas pixel storage and its byte/nibble layout math
//! - Dirty-range tracking for partial display updates
//! - Shape rasterizer (lines, rectangles, ellipses, polygons, scroll, blit)
//! - Text engine (bitmap fonts plus a seekable fallback font)
//! - Indexed bitmap blitter
//! - Configuration types and parser
//!
//! The hardware-facing driver lives in `lumen-drivers` and consumes the
//! [`Screen`] built here.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod blit;
pub mod canvas;
pub mod config;
pub mod palette;
pub mod raster;
pub mod screen;
pub mod text;
pub mod traits;

pub use blit::{Bitmap, Icon};
pub use canvas::{Canvas, CanvasError, PixelFormat, RawImage};
pub use config::{ColorOrder, ConfigError, DisplayConfig, LumenConfig, ThemeConfig};
pub use palette::{Palette, PALETTE_SIZE};
pub use screen::{DirtyRange, Screen};
pub use text::{BitmapFont, FallbackFont, GlyphSource, NoFallback, TextStyle};
pub use traits::{Display, DisplayExt};
