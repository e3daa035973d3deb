//! Monospace 1-bit bitmap fonts

/// Byte offset of glyph `codepoint` in a font's data block
///
/// Glyphs are stored back to back, each `height` rows of `width / 8`
/// bytes.
pub const fn glyph_offset(codepoint: u32, first: u32, width: u8, height: u8) -> usize {
    (codepoint - first) as usize * height as usize * width as usize / 8
}

/// Fixed-size bitmap font covering codepoints `[first, last)`
///
/// Rows are MSB-first, row-major. `width` is a multiple of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont<'a> {
    pub width: u8,
    pub height: u8,
    pub first: u32,
    pub last: u32,
    pub data: &'a [u8],
}

impl<'a> BitmapFont<'a> {
    pub const fn new(width: u8, height: u8, first: u32, last: u32, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            first,
            last,
            data,
        }
    }

    /// Bytes per glyph row
    pub const fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Bytes per glyph
    pub const fn glyph_len(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Whether `codepoint` is in this font's range
    pub const fn contains(&self, codepoint: u32) -> bool {
        self.first <= codepoint && codepoint < self.last
    }

    /// Glyph bytes for `codepoint`
    ///
    /// `None` if the codepoint is outside the range or the data block is
    /// truncated.
    pub fn glyph(&self, codepoint: u32) -> Option<&'a [u8]> {
        if !self.contains(codepoint) {
            return None;
        }
        let start = glyph_offset(codepoint, self.first, self.width, self.height);
        self.data.get(start..start + self.glyph_len())
    }

    /// Fallback glyph scale that lines up with this font's height
    pub const fn fallback_scale(&self) -> u8 {
        if self.height < 16 {
            1
        } else {
            self.height / 8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [u8; 24] = [
        // '0'
        0x3C, 0x42, 0x46, 0x4A, 0x52, 0x62, 0x42, 0x3C, //
        // '1'
        0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x08, 0x3E, //
        // '2'
        0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x40, 0x7E,
    ];

    #[test]
    fn test_glyph_offset() {
        assert_eq!(glyph_offset(0x30, 0x30, 8, 8), 0);
        assert_eq!(glyph_offset(0x32, 0x30, 8, 8), 16);
        assert_eq!(glyph_offset(0x41, 0x20, 16, 16), 33 * 32);
    }

    #[test]
    fn test_glyph_lookup() {
        let font = BitmapFont::new(8, 8, b'0' as u32, b'3' as u32, &DATA);
        assert_eq!(font.glyph('1' as u32).map(|g| g[7]), Some(0x3E));
        assert!(font.glyph('3' as u32).is_none());
        assert!(font.glyph('/' as u32).is_none());
    }

    #[test]
    fn test_truncated_data() {
        let font = BitmapFont::new(8, 8, 0x30, 0x40, &DATA);
        assert!(font.contains(0x35));
        assert!(font.glyph(0x35).is_none());
    }

    #[test]
    fn test_fallback_scale() {
        assert_eq!(BitmapFont::new(8, 8, 0, 1, &[]).fallback_scale(), 1);
        assert_eq!(BitmapFont::new(8, 12, 0, 1, &[]).fallback_scale(), 1);
        assert_eq!(BitmapFont::new(16, 16, 0, 1, &[]).fallback_scale(), 2);
        assert_eq!(BitmapFont::new(16, 32, 0, 1, &[]).fallback_scale(), 4);
    }
}
