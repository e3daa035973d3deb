//! Indexed bitmap blitter
//!
//! Bitmaps are packed MSB-first at 1 to 8 bits per pixel and may hold
//! several frames back to back (sprite sheets, animated icons). Each pixel
//! value is looked up in a palette of RGB565 colors before it is written.

use crate::canvas::RawImage;
use crate::raster::clamp_coord;
use crate::screen::Screen;

/// Bit offset of pixel `pixel_index` in frame `index`
pub const fn bit_offset(pixel_index: usize, index: usize, pixel_count: usize, bpp: u8) -> usize {
    let bpp = bpp as usize;
    pixel_index * bpp + index * pixel_count * bpp
}

/// Read a `bpp`-bit value starting at bit `bit`, MSB-first
///
/// Values may straddle a byte boundary. `None` if the data runs out.
pub fn extract_bits(data: &[u8], bit: usize, bpp: u8) -> Option<u8> {
    if bpp == 0 || bpp > 8 {
        return None;
    }
    let byte = bit / 8;
    let shift = bit % 8;
    let hi = *data.get(byte)? as u16;
    let lo = if shift + bpp as usize > 8 {
        *data.get(byte + 1)? as u16
    } else {
        0
    };
    let word = (hi << 8) | lo;
    let mask = (1u16 << bpp) - 1;
    Some(((word >> (16 - shift - bpp as usize)) & mask) as u8)
}

/// Palette-indexed bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<'a> {
    pub width: u16,
    pub height: u16,
    /// Bits per pixel, 1..=8
    pub bpp: u8,
    pub data: &'a [u8],
    /// Colors for each pixel value
    pub palette: &'a [u16],
}

impl Bitmap<'_> {
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of whole frames in `data`
    pub const fn frames(&self) -> usize {
        let bits = self.pixel_count() * self.bpp as usize;
        if bits == 0 {
            0
        } else {
            self.data.len() * 8 / bits
        }
    }
}

/// Anything that can be drawn as an icon
#[derive(Debug, Clone, Copy)]
pub enum Icon<'a> {
    /// Palette-indexed bitmap, frame 0
    Bitmap(Bitmap<'a>),
    /// Image already in the canvas's pixel format
    Raw(RawImage<'a>),
}

impl Icon<'_> {
    pub const fn size(&self) -> (u16, u16) {
        match self {
            Icon::Bitmap(b) => (b.width, b.height),
            Icon::Raw(r) => (r.width, r.height),
        }
    }
}

impl Screen {
    /// Draw frame `index` of `bitmap` at `(x, y)`
    ///
    /// `palette` overrides the bitmap's own palette. Pixels whose mapped
    /// color equals `key`, or whose value has no palette entry, are skipped.
    pub fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap<'_>,
        x: i32,
        y: i32,
        index: usize,
        key: Option<u16>,
        palette: Option<&[u16]>,
    ) {
        if bitmap.bpp == 0 || bitmap.bpp > 8 {
            return;
        }
        let palette = palette.unwrap_or(bitmap.palette);
        let pixel_count = bitmap.pixel_count();
        let x = clamp_coord(x);
        let y = clamp_coord(y);
        let (canvas, dirty) = self.parts_mut();

        for row in 0..bitmap.height as usize {
            for col in 0..bitmap.width as usize {
                let pixel = row * bitmap.width as usize + col;
                let bit = bit_offset(pixel, index, pixel_count, bitmap.bpp);
                let Some(value) = extract_bits(bitmap.data, bit, bitmap.bpp) else {
                    continue;
                };
                let Some(&color) = palette.get(value as usize) else {
                    continue;
                };
                if Some(color) == key {
                    continue;
                }
                canvas.set_pixel(x + col as i32, y + row as i32, color);
            }
        }
        dirty.include(y, y + bitmap.height as i32);
    }

    /// Draw an icon at `(x, y)` with optional transparency key
    pub fn draw_icon(&mut self, icon: &Icon<'_>, x: i32, y: i32, key: Option<u16>) {
        match icon {
            Icon::Bitmap(bitmap) => self.draw_bitmap(bitmap, x, y, 0, key, None),
            Icon::Raw(image) => self.blit_buffer(image, x, y, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelFormat};

    const COLORS: [u16; 4] = [0x0000, 0xF800, 0x07E0, 0x001F];

    fn screen() -> Screen {
        Screen::new(Canvas::new(8, 8, PixelFormat::FullColor).unwrap())
    }

    #[test]
    fn test_bit_offset() {
        assert_eq!(bit_offset(0, 0, 16, 2), 0);
        assert_eq!(bit_offset(3, 0, 16, 2), 6);
        assert_eq!(bit_offset(0, 1, 16, 2), 32);
        assert_eq!(bit_offset(5, 2, 64, 1), 133);
    }

    #[test]
    fn test_extract_bits() {
        let data = [0b1011_0010, 0b0111_0000];
        assert_eq!(extract_bits(&data, 0, 1), Some(1));
        assert_eq!(extract_bits(&data, 1, 1), Some(0));
        assert_eq!(extract_bits(&data, 0, 2), Some(0b10));
        assert_eq!(extract_bits(&data, 2, 2), Some(0b11));
        // 3 bpp straddling the byte boundary: bits 6..9
        assert_eq!(extract_bits(&data, 6, 3), Some(0b100));
        assert_eq!(extract_bits(&data, 8, 8), Some(0b0111_0000));
        assert_eq!(extract_bits(&data, 12, 8), None);
        assert_eq!(extract_bits(&data, 0, 9), None);
    }

    #[test]
    fn test_draw_bitmap_2bpp() {
        let mut s = screen();
        // 2x2: 1 2 / 3 0
        let bitmap = Bitmap {
            width: 2,
            height: 2,
            bpp: 2,
            data: &[0b0110_1100],
            palette: &COLORS,
        };
        s.draw_bitmap(&bitmap, 1, 2, 0, Some(0x0000), None);
        let c = s.canvas();
        assert_eq!(c.get_pixel(1, 2), Some(0xF800));
        assert_eq!(c.get_pixel(2, 2), Some(0x07E0));
        assert_eq!(c.get_pixel(1, 3), Some(0x001F));
        assert_eq!(s.dirty().span(), Some((2, 4)));
    }

    #[test]
    fn test_draw_bitmap_frame_and_palette_override() {
        let mut s = screen();
        s.canvas_mut().fill(0x1234);
        // 1bpp 2x1, frame 0 = 10, frame 1 = 01
        let bitmap = Bitmap {
            width: 2,
            height: 1,
            bpp: 1,
            data: &[0b1001_0000],
            palette: &COLORS,
        };
        let override_palette = [0xAAAA, 0xBBBB];
        s.draw_bitmap(&bitmap, 0, 0, 1, Some(0xAAAA), Some(&override_palette));
        assert_eq!(s.canvas().get_pixel(0, 0), Some(0x1234));
        assert_eq!(s.canvas().get_pixel(1, 0), Some(0xBBBB));
    }

    #[test]
    fn test_missing_palette_entry_skipped() {
        let mut s = screen();
        let bitmap = Bitmap {
            width: 1,
            height: 1,
            bpp: 4,
            data: &[0xF0],
            palette: &COLORS,
        };
        s.draw_bitmap(&bitmap, 0, 0, 0, None, None);
        assert_eq!(s.canvas().get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_invalid_bpp_draws_nothing() {
        let mut s = screen();
        let bitmap = Bitmap {
            width: 1,
            height: 1,
            bpp: 9,
            data: &[0xFF, 0xFF],
            palette: &COLORS,
        };
        s.draw_bitmap(&bitmap, 0, 0, 0, None, None);
        assert!(s.dirty().is_empty());
    }

    #[test]
    fn test_draw_icon_variants() {
        let mut s = screen();
        let bitmap = Icon::Bitmap(Bitmap {
            width: 1,
            height: 1,
            bpp: 1,
            data: &[0x80],
            palette: &COLORS,
        });
        s.draw_icon(&bitmap, 7, 7, None);
        assert_eq!(s.canvas().get_pixel(7, 7), Some(0xF800));

        let raw_data = 0x07E0u16.swap_bytes().to_le_bytes();
        let raw = Icon::Raw(RawImage {
            width: 1,
            height: 1,
            data: &raw_data,
        });
        assert_eq!(raw.size(), (1, 1));
        s.draw_icon(&raw, 0, 0, None);
        assert_eq!(s.canvas().get_pixel(0, 0), Some(0x07E0));
    }

    #[test]
    fn test_frames() {
        let bitmap = Bitmap {
            width: 4,
            height: 4,
            bpp: 2,
            data: &[0; 12],
            palette: &COLORS,
        };
        assert_eq!(bitmap.frames(), 3);
    }
}
