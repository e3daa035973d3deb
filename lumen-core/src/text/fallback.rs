//! Seekable 8x8 fallback font
//!
//! The fallback font is a flat table of 8-byte slots indexed by codepoint,
//! too large to keep in RAM. Glyphs are read one at a time from any
//! [`embedded_io`] reader that can seek, typically external flash.
//!
//! ```text
//! offset = codepoint * 8
//! cp <  128: 4 px wide, high nibble of each row byte
//! cp >= 128: 8 px wide, whole row byte
//! ```

use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

/// Bytes in one glyph slot
pub const GLYPH_BYTES: usize = 8;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: u8 = 8;

/// Width of one fallback cell in pixels
pub const CELL_WIDTH: u8 = 4;

/// Byte offset of the slot for `codepoint`
pub const fn glyph_slot_offset(codepoint: u32) -> u64 {
    codepoint as u64 * GLYPH_BYTES as u64
}

/// Number of 4 px cells a fallback glyph occupies
pub const fn glyph_cells(codepoint: u32) -> u8 {
    if codepoint < 128 {
        1
    } else {
        2
    }
}

/// Glyph read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// No fallback font is attached
    Unavailable,
    /// Seek failed
    Seek,
    /// Slot could not be read in full
    Read,
}

/// Source of fallback glyph bitmaps
pub trait GlyphSource {
    /// Read the 8-byte slot for `codepoint` into `out`
    fn read_glyph(&mut self, codepoint: u32, out: &mut [u8; GLYPH_BYTES]) -> Result<(), FontError>;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &mut G {
    fn read_glyph(&mut self, codepoint: u32, out: &mut [u8; GLYPH_BYTES]) -> Result<(), FontError> {
        G::read_glyph(self, codepoint, out)
    }
}

/// Glyph source with nothing behind it
///
/// Every read fails, so non-bitmap characters render as blank cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl GlyphSource for NoFallback {
    fn read_glyph(&mut self, _codepoint: u32, _out: &mut [u8; GLYPH_BYTES]) -> Result<(), FontError> {
        Err(FontError::Unavailable)
    }
}

/// Fallback font backed by a seekable reader
#[derive(Debug)]
pub struct FallbackFont<R> {
    reader: R,
}

impl<R: Read + Seek> FallbackFont<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Give the reader back
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> GlyphSource for FallbackFont<R> {
    fn read_glyph(&mut self, codepoint: u32, out: &mut [u8; GLYPH_BYTES]) -> Result<(), FontError> {
        self.reader
            .seek(SeekFrom::Start(glyph_slot_offset(codepoint)))
            .map_err(|_| FontError::Seek)?;
        self.reader.read_exact(out).map_err(|_| FontError::Read)
    }
}

/// In-memory font table, for fonts linked into flash or tests
#[derive(Debug, Clone)]
pub struct MemoryGlyphs<'a> {
    data: &'a [u8],
    position: u64,
}

impl<'a> MemoryGlyphs<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }
}

/// Seek before the start of a [`MemoryGlyphs`] table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidSeek;

impl embedded_io::Error for InvalidSeek {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl ErrorType for MemoryGlyphs<'_> {
    type Error = InvalidSeek;
}

impl Read for MemoryGlyphs<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let start = (self.position as usize).min(self.data.len());
        let remaining = &self.data[start..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Seek for MemoryGlyphs<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => (self.data.len() as u64).checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };
        self.position = target.ok_or(InvalidSeek)?;
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> [u8; 2 * GLYPH_BYTES] {
        let mut data = [0u8; 2 * GLYPH_BYTES];
        data[GLYPH_BYTES..].copy_from_slice(&[0xF0, 0x90, 0x90, 0xF0, 0, 0, 0, 0xFF]);
        data
    }

    #[test]
    fn test_glyph_slot_offset() {
        assert_eq!(glyph_slot_offset(0), 0);
        assert_eq!(glyph_slot_offset(b'A' as u32), 520);
        assert_eq!(glyph_slot_offset(0x4E2D), 0x4E2D * 8);
    }

    #[test]
    fn test_glyph_cells() {
        assert_eq!(glyph_cells(b'z' as u32), 1);
        assert_eq!(glyph_cells(127), 1);
        assert_eq!(glyph_cells(128), 2);
        assert_eq!(glyph_cells(0x4E2D), 2);
    }

    #[test]
    fn test_read_glyph() {
        let data = table();
        let mut font = FallbackFont::new(MemoryGlyphs::new(&data));
        let mut glyph = [0u8; GLYPH_BYTES];
        font.read_glyph(1, &mut glyph).unwrap();
        assert_eq!(glyph[0], 0xF0);
        assert_eq!(glyph[7], 0xFF);
    }

    #[test]
    fn test_read_past_end_fails() {
        let data = table();
        let mut font = FallbackFont::new(MemoryGlyphs::new(&data));
        let mut glyph = [0u8; GLYPH_BYTES];
        assert_eq!(font.read_glyph(2, &mut glyph), Err(FontError::Read));
        assert_eq!(NoFallback.read_glyph(1, &mut glyph), Err(FontError::Unavailable));
    }

    #[test]
    fn test_memory_seek() {
        let data = [1u8, 2, 3, 4];
        let mut mem = MemoryGlyphs::new(&data);
        assert_eq!(mem.seek(SeekFrom::End(-1)), Ok(3));
        let mut byte = [0u8; 1];
        assert_eq!(mem.read(&mut byte), Ok(1));
        assert_eq!(byte[0], 4);
        assert_eq!(mem.seek(SeekFrom::Current(-10)), Err(InvalidSeek));
    }
}
