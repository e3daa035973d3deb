//! 16-entry RGB565 color table
//!
//! The palette is owned by whoever themes the UI and is only read by the
//! graphics core (bitmap icons, 4-bit buffer expansion).

use core::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of palette entries (one per 4-bit index)
pub const PALETTE_SIZE: usize = 16;

/// Default theme: black background through white foreground
pub const DEFAULT_COLORS: [u16; PALETTE_SIZE] = [
    0x0000, 0x10A2, 0x2124, 0x31A6, 0x4228, 0x52AA, 0x632C, 0x73AE, // grey ramp
    0x8430, 0x94B2, 0xA534, 0xB5B6, 0xC638, 0xD6BA, 0xE73C, 0xFFFF,
];

/// Ordered table of 16 RGB565 colors
///
/// Index 0 is conventionally the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    colors: [u16; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

impl Palette {
    /// Create a palette from 16 colors
    pub const fn new(colors: [u16; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Color for a 4-bit index
    ///
    /// Only the low nibble of `index` is used, so every value maps to an
    /// entry.
    pub const fn get(&self, index: u8) -> u16 {
        self.colors[(index & 0x0F) as usize]
    }

    /// Replace the color at a 4-bit index
    pub fn set(&mut self, index: u8, color: u16) {
        self.colors[(index & 0x0F) as usize] = color;
    }

    /// All colors in index order
    pub fn as_slice(&self) -> &[u16] {
        &self.colors
    }

    /// Background color (index 0)
    pub const fn background(&self) -> u16 {
        self.colors[0]
    }
}

impl Index<u8> for Palette {
    type Output = u16;

    fn index(&self, index: u8) -> &u16 {
        &self.colors[(index & 0x0F) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut palette = Palette::default();
        assert_eq!(palette.get(0), 0x0000);
        assert_eq!(palette.get(15), 0xFFFF);

        palette.set(3, 0xF800);
        assert_eq!(palette.get(3), 0xF800);
        assert_eq!(palette[3], 0xF800);
    }

    #[test]
    fn test_index_wraps_to_nibble() {
        let palette = Palette::default();
        assert_eq!(palette.get(0x1F), palette.get(0x0F));
        assert_eq!(palette[0x10], palette.background());
    }
}
