//! Pixel storage
//!
//! The canvas owns the framebuffer bytes and knows how a color is packed
//! into them. It has no idea about shapes or dirty tracking; those live in
//! [`crate::raster`] and [`crate::screen`].
//!
//! Colors are `u16` values in the canvas's own space: an RGB565 color for
//! [`PixelFormat::FullColor`], a palette index (low nibble) for
//! [`PixelFormat::Indexed4`].

pub mod layout;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use layout::{buffer_len, color_offset, nibble_slot, pixel_index, swap_color};

/// Storage format of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    /// 16-bit RGB565, two bytes per pixel
    #[default]
    FullColor,
    /// 4-bit palette index, two pixels per byte
    Indexed4,
}

impl PixelFormat {
    /// Bits used by one pixel
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            PixelFormat::FullColor => 16,
            PixelFormat::Indexed4 => 4,
        }
    }

    /// Buffer size for a `width` x `height` canvas in this format
    pub const fn buffer_len(self, width: usize, height: usize) -> usize {
        buffer_len(width, height, self.bits_per_pixel())
    }
}

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// The buffer could not be allocated
    OutOfMemory,
    /// A new shape needs a different buffer size than the one allocated
    ShapeMismatch,
}

/// Pre-rendered image stored in the same format and byte order as the
/// canvas it is blitted onto
#[derive(Debug, Clone, Copy)]
pub struct RawImage<'a> {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Packed pixel data
    pub data: &'a [u8],
}

/// Framebuffer with format-aware pixel access
///
/// All writes clip to `[0, width) x [0, height)`. Pixels outside are
/// dropped without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    format: PixelFormat,
    needs_byte_swap: bool,
    buffer: Vec<u8>,
}

impl Canvas {
    /// Allocate a zeroed canvas
    ///
    /// Byte swapping defaults to on, which puts RGB565 pixels in the
    /// big-endian order SPI display controllers expect.
    pub fn new(width: u16, height: u16, format: PixelFormat) -> Result<Self, CanvasError> {
        let len = format.buffer_len(width as usize, height as usize);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| CanvasError::OutOfMemory)?;
        buffer.resize(len, 0);

        Ok(Self {
            width,
            height,
            format,
            needs_byte_swap: true,
            buffer,
        })
    }

    /// Builder-style override of the byte swap flag
    pub fn with_byte_swap(mut self, needs_byte_swap: bool) -> Self {
        self.needs_byte_swap = needs_byte_swap;
        self
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Storage format
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether 16-bit colors are byte swapped on store
    pub const fn needs_byte_swap(&self) -> bool {
        self.needs_byte_swap
    }

    /// Reinterpret the buffer with new dimensions
    ///
    /// Used when the panel is rotated. The pixel count must stay the same
    /// since the buffer is never reallocated; existing content is kept
    /// as raw bytes.
    pub fn reshape(&mut self, width: u16, height: u16) -> Result<(), CanvasError> {
        if self.format.buffer_len(width as usize, height as usize) != self.buffer.len() {
            return Err(CanvasError::ShapeMismatch);
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Convert between canonical RGB565 and stored byte order
    ///
    /// The swap is its own inverse, so the same call is used on store and
    /// on load.
    pub const fn format_color(&self, color: u16) -> u16 {
        if self.needs_byte_swap {
            swap_color(color)
        } else {
            color
        }
    }

    fn clip(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Write one pixel, dropping it if out of bounds
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        if let Some((x, y)) = self.clip(x, y) {
            self.put(x, y, color);
        }
    }

    /// Read one pixel back in canonical form
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        let (x, y) = self.clip(x, y)?;
        Some(self.fetch(x, y))
    }

    /// Store a pixel known to be in bounds
    pub(crate) fn put(&mut self, x: usize, y: usize, color: u16) {
        let index = pixel_index(self.width as usize, x, y);
        match self.format {
            PixelFormat::FullColor => {
                let offset = color_offset(index);
                let bytes = self.format_color(color).to_le_bytes();
                self.buffer[offset..offset + 2].copy_from_slice(&bytes);
            }
            PixelFormat::Indexed4 => {
                let slot = nibble_slot(index);
                self.buffer[slot.byte] = slot.store(self.buffer[slot.byte], color as u8);
            }
        }
    }

    /// Load a pixel known to be in bounds
    pub(crate) fn fetch(&self, x: usize, y: usize) -> u16 {
        let index = pixel_index(self.width as usize, x, y);
        match self.format {
            PixelFormat::FullColor => {
                let offset = color_offset(index);
                let raw = u16::from_le_bytes([self.buffer[offset], self.buffer[offset + 1]]);
                self.format_color(raw)
            }
            PixelFormat::Indexed4 => {
                let slot = nibble_slot(index);
                slot.load(self.buffer[slot.byte]) as u16
            }
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: u16) {
        match self.format {
            PixelFormat::FullColor => {
                let bytes = self.format_color(color).to_le_bytes();
                for pair in self.buffer.chunks_exact_mut(2) {
                    pair.copy_from_slice(&bytes);
                }
            }
            PixelFormat::Indexed4 => {
                let nibble = (color & 0x0F) as u8;
                self.buffer.fill((nibble << 4) | nibble);
            }
        }
    }

    /// Fill a rectangle, clipped to the canvas
    ///
    /// Non-positive sizes draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let (x0, x1) = (x0 as usize, x1 as usize);
        match self.format {
            PixelFormat::FullColor => {
                let bytes = self.format_color(color).to_le_bytes();
                let width = self.width as usize;
                for row in y0 as usize..y1 as usize {
                    let start = color_offset(pixel_index(width, x0, row));
                    let end = color_offset(pixel_index(width, x1, row));
                    for pair in self.buffer[start..end].chunks_exact_mut(2) {
                        pair.copy_from_slice(&bytes);
                    }
                }
            }
            PixelFormat::Indexed4 => {
                for row in y0 as usize..y1 as usize {
                    for col in x0..x1 {
                        self.put(col, row, color);
                    }
                }
            }
        }
    }

    /// Horizontal run of `len` pixels starting at `(x, y)`
    pub fn fill_span(&mut self, x: i32, y: i32, len: i32, color: u16) {
        self.fill_rect(x, y, len, 1, color);
    }

    /// Horizontal run of `len` pixels
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: u16) {
        self.fill_span(x, y, len, color);
    }

    /// Vertical run of `len` pixels
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: u16) {
        self.fill_rect(x, y, 1, len, color);
    }

    /// Raw buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Raw buffer, mutable
    ///
    /// Writes through this slice bypass clipping and dirty tracking.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Bytes backing rows `[y0, y1)`
    ///
    /// For [`PixelFormat::FullColor`] this is exactly the wire data for
    /// those rows. For [`PixelFormat::Indexed4`] rows may start mid-byte,
    /// so the slice is widened to whole bytes.
    pub fn rows(&self, y0: u16, y1: u16) -> &[u8] {
        let y1 = y1.min(self.height);
        let y0 = y0.min(y1);
        let width = self.width as usize;
        let bits = self.format.bits_per_pixel();
        let start = pixel_index(width, 0, y0 as usize) * bits / 8;
        let end = buffer_len(width, y1 as usize, bits);
        &self.buffer[start..end]
    }

    /// Bytes backing a single row
    pub fn row_bytes(&self, y: u16) -> &[u8] {
        self.rows(y, y.saturating_add(1))
    }

    /// Expand row `y` to formatted RGB565 bytes through `palette`
    ///
    /// Returns the number of bytes written. Full-color canvases copy the
    /// row unchanged. Output shorter than a row is filled as far as it
    /// goes.
    pub fn expand_row(&self, y: u16, palette: &Palette, out: &mut [u8]) -> usize {
        if y >= self.height {
            return 0;
        }
        let pixels = (self.width as usize).min(out.len() / 2);
        match self.format {
            PixelFormat::FullColor => {
                let row = self.row_bytes(y);
                out[..pixels * 2].copy_from_slice(&row[..pixels * 2]);
            }
            PixelFormat::Indexed4 => {
                for (x, pair) in out.chunks_exact_mut(2).take(pixels).enumerate() {
                    let index = self.fetch(x, y as usize) as u8;
                    let color = self.format_color(palette.get(index));
                    pair.copy_from_slice(&color.to_le_bytes());
                }
            }
        }
        pixels * 2
    }

    /// Read pixel `(x, y)` of an image stored in this canvas's format
    ///
    /// Returns `None` if the coordinate or its bytes fall outside the image.
    pub fn decode_raw(&self, image: &RawImage<'_>, x: usize, y: usize) -> Option<u16> {
        if x >= image.width as usize || y >= image.height as usize {
            return None;
        }
        let index = pixel_index(image.width as usize, x, y);
        match self.format {
            PixelFormat::FullColor => {
                let offset = color_offset(index);
                let bytes = image.data.get(offset..offset + 2)?;
                Some(self.format_color(u16::from_le_bytes([bytes[0], bytes[1]])))
            }
            PixelFormat::Indexed4 => {
                let slot = nibble_slot(index);
                image.data.get(slot.byte).map(|&b| slot.load(b) as u16)
            }
        }
    }
}
