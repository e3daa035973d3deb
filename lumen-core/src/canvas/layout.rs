//! Byte and nibble layout of the pixel buffer
//!
//! Every offset computation for the canvas lives here as a small pure
//! function so the packing rules are written (and tested) exactly once.
//!
//! ```text
//! FullColor:  [lo|hi] [lo|hi] ...          2 bytes per pixel
//! Indexed4:   [p0 p1] [p2 p3] ...          p0 = high nibble
//! ```

/// Linear index of pixel `(x, y)` in a row-major buffer
pub const fn pixel_index(width: usize, x: usize, y: usize) -> usize {
    y * width + x
}

/// Location of a 4-bit pixel inside the packed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NibbleSlot {
    /// Byte holding the pixel
    pub byte: usize,
    /// True if the pixel occupies the high nibble
    pub high: bool,
}

impl NibbleSlot {
    /// Bit shift of the nibble within its byte
    pub const fn shift(&self) -> u8 {
        if self.high {
            4
        } else {
            0
        }
    }

    /// Mask selecting the nibble within its byte
    pub const fn mask(&self) -> u8 {
        0x0F << self.shift()
    }

    /// Replace this slot's nibble in `byte` with `value`
    pub const fn store(&self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask()) | ((value & 0x0F) << self.shift())
    }

    /// Read this slot's nibble out of `byte`
    pub const fn load(&self, byte: u8) -> u8 {
        (byte >> self.shift()) & 0x0F
    }
}

/// Nibble slot for a linear pixel index
///
/// The first pixel of each pair (even index) takes the high nibble.
pub const fn nibble_slot(pixel_index: usize) -> NibbleSlot {
    NibbleSlot {
        byte: pixel_index / 2,
        high: (pixel_index + 1) % 2 == 1,
    }
}

/// Byte offset of a 16-bit pixel
pub const fn color_offset(pixel_index: usize) -> usize {
    pixel_index * 2
}

/// Buffer size in bytes for a `width` x `height` image at `bits_per_pixel`
pub const fn buffer_len(width: usize, height: usize, bits_per_pixel: usize) -> usize {
    (width * height * bits_per_pixel + 7) / 8
}

/// Swap the two bytes of an RGB565 color
pub const fn swap_color(color: u16) -> u16 {
    color.swap_bytes()
}
