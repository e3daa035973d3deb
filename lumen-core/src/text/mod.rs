//! Text rendering
//!
//! Characters covered by the active [`BitmapFont`] are drawn from it; all
//! others come from the seekable [`FallbackFont`]. With no bitmap font
//! every character uses the fallback.

pub mod bitmap;
pub mod fallback;
pub mod utf8;

pub use bitmap::{glyph_offset, BitmapFont};
pub use fallback::{
    glyph_cells, glyph_slot_offset, FallbackFont, FontError, GlyphSource, MemoryGlyphs,
    NoFallback, CELL_WIDTH, GLYPH_BYTES, GLYPH_HEIGHT,
};
pub use utf8::{cell_count, classify_lead_byte, measure_width, LeadByte};

use crate::canvas::Canvas;
use crate::raster::clamp_coord;
use crate::screen::Screen;

/// Colors and scale for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Foreground color
    pub color: u16,
    /// Background for clear bits; `None` leaves them untouched
    pub background: Option<u16>,
    /// Integer upscale factor, at least 1
    pub scale: u8,
}

impl TextStyle {
    /// Transparent text at scale 1
    pub const fn new(color: u16) -> Self {
        Self {
            color,
            background: None,
            scale: 1,
        }
    }

    pub const fn with_background(mut self, background: u16) -> Self {
        self.background = Some(background);
        self
    }

    pub const fn with_scale(mut self, scale: u8) -> Self {
        self.scale = if scale == 0 { 1 } else { scale };
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(0xFFFF)
    }
}

/// Scale applied to fallback glyphs next to `font`
fn fallback_scale(style: &TextStyle, font: Option<&BitmapFont<'_>>) -> i32 {
    let font_scale = font.map_or(1, |f| f.fallback_scale());
    style.scale.max(1) as i32 * font_scale as i32
}

/// Advance in pixels of `ch`
fn advance(ch: char, font: Option<&BitmapFont<'_>>, style: &TextStyle) -> i32 {
    let cp = ch as u32;
    match font {
        Some(f) if f.contains(cp) => f.width as i32 * style.scale.max(1) as i32,
        _ => glyph_cells(cp) as i32 * CELL_WIDTH as i32 * fallback_scale(style, font),
    }
}

/// Width in pixels of `text` as [`Screen::draw_text`] would lay it out
pub fn text_width(text: &str, font: Option<&BitmapFont<'_>>, scale: u8) -> i32 {
    let style = TextStyle::new(0).with_scale(scale);
    text.chars()
        .fold(0i32, |w, ch| w.saturating_add(advance(ch, font, &style)))
}

/// Draw a 1-bit MSB-first glyph of `cols` x `rows` pixels
#[allow(clippy::too_many_arguments)]
fn draw_mono(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    bits: &[u8],
    row_bytes: usize,
    cols: usize,
    rows: usize,
    scale: i32,
    style: &TextStyle,
) {
    for row in 0..rows {
        let py = y.saturating_add(row as i32 * scale);
        for col in 0..cols {
            let px = x.saturating_add(col as i32 * scale);
            if px >= canvas.width() as i32 {
                break;
            }
            let byte = bits.get(row * row_bytes + col / 8).copied().unwrap_or(0);
            let set = byte & (0x80 >> (col % 8)) != 0;
            if set {
                canvas.fill_rect(px, py, scale, scale, style.color);
            } else if let Some(bg) = style.background {
                canvas.fill_rect(px, py, scale, scale, bg);
            }
        }
    }
}

impl Screen {
    /// Draw `text` with its top-left corner at `(x, y)`
    ///
    /// Returns the x coordinate just past the last glyph. Glyphs off the
    /// canvas are clipped. A fallback glyph that cannot be read is left
    /// blank (or background-filled) but still advances the cursor.
    pub fn draw_text<G: GlyphSource>(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        style: &TextStyle,
        font: Option<&BitmapFont<'_>>,
        fallback: &mut G,
    ) -> i32 {
        let mut cursor = clamp_coord(x);
        let y = clamp_coord(y);
        let scale = style.scale.max(1) as i32;
        let fb_scale = fallback_scale(style, font);
        let (canvas, dirty) = self.parts_mut();

        for ch in text.chars() {
            let cp = ch as u32;
            let step = advance(ch, font, style);

            let bitmap = font.filter(|f| f.contains(cp));
            if let Some(f) = bitmap {
                let height = f.height as i32 * scale;
                match f.glyph(cp) {
                    Some(bits) => draw_mono(
                        canvas,
                        cursor,
                        y,
                        bits,
                        f.row_bytes(),
                        f.width as usize,
                        f.height as usize,
                        scale,
                        style,
                    ),
                    None => {
                        if let Some(bg) = style.background {
                            canvas.fill_rect(cursor, y, step, height, bg);
                        }
                    }
                }
                dirty.include(y, y.saturating_add(height));
            } else {
                let height = GLYPH_HEIGHT as i32 * fb_scale;
                let mut glyph = [0u8; GLYPH_BYTES];
                match fallback.read_glyph(cp, &mut glyph) {
                    Ok(()) => {
                        let cols = glyph_cells(cp) as usize * CELL_WIDTH as usize;
                        draw_mono(
                            canvas,
                            cursor,
                            y,
                            &glyph,
                            1,
                            cols,
                            GLYPH_HEIGHT as usize,
                            fb_scale,
                            style,
                        );
                    }
                    Err(_err) => {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("fallback glyph {:x} unavailable: {}", cp, _err);
                        if let Some(bg) = style.background {
                            canvas.fill_rect(cursor, y, step, height, bg);
                        }
                    }
                }
                dirty.include(y, y.saturating_add(height));
            }

            cursor = cursor.saturating_add(step);
        }
        cursor
    }
}
