//! Configuration type definitions
//!
//! These describe the physical panel and the UI theme. They are small,
//! `Copy`, and stored in flash as postcard-serialized binary data.

use crate::canvas::{CanvasError, PixelFormat};
use crate::palette::{Palette, DEFAULT_COLORS, PALETTE_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SPI clock for the panel
pub const DEFAULT_SPI_FREQUENCY: u32 = 40_000_000;

/// Subpixel order of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Physical display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel width at rotation 0
    pub width: u16,
    /// Panel height at rotation 0
    pub height: u16,
    /// Initial rotation (0-3, quarter turns)
    pub rotation: u8,
    pub color_order: ColorOrder,
    /// Framebuffer storage format
    pub format: PixelFormat,
    /// Store colors byte-swapped so rows go out big-endian
    pub byte_swap: bool,
    /// SPI clock in Hz
    pub spi_frequency: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 135,
            height: 240,
            rotation: 1,
            color_order: ColorOrder::Rgb,
            format: PixelFormat::FullColor,
            byte_swap: true,
            spi_frequency: DEFAULT_SPI_FREQUENCY,
        }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThemeConfig {
    /// Palette colors, index 0 is the background
    pub colors: [u16; PALETTE_SIZE],
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
        }
    }
}

impl ThemeConfig {
    pub const fn palette(&self) -> Palette {
        Palette::new(self.colors)
    }
}

impl From<&Palette> for ThemeConfig {
    fn from(palette: &Palette) -> Self {
        let mut colors = [0u16; PALETTE_SIZE];
        colors.copy_from_slice(palette.as_slice());
        Self { colors }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LumenConfig {
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
}

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No rotation table for this panel size
    UnsupportedPanel { width: u16, height: u16 },
    /// Rotated size does not match the allocated framebuffer
    InvalidGeometry,
    /// Framebuffer allocation failed
    OutOfMemory,
    /// Serialization failed
    Encoding,
    /// Stored data is corrupt or from another version
    Decoding,
}

impl From<CanvasError> for ConfigError {
    fn from(err: CanvasError) -> Self {
        match err {
            CanvasError::ShapeMismatch => ConfigError::InvalidGeometry,
            CanvasError::OutOfMemory => ConfigError::OutOfMemory,
        }
    }
}
