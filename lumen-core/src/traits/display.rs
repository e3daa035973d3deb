//! Display trait for panel drivers
//!
//! The driver owns the [`Screen`]; applications draw into it and call
//! [`Display::show`] to push the dirty rows out.

use crate::screen::Screen;
use crate::text::{text_width, BitmapFont, GlyphSource, TextStyle};

/// Trait for a panel that can present a [`Screen`]
pub trait Display {
    /// Error from the underlying bus
    type Error;

    /// Send every dirty row to the panel
    ///
    /// Does nothing (and touches no hardware) when the dirty range is
    /// empty.
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Framebuffer
    fn screen(&self) -> &Screen;

    /// Framebuffer, mutable
    fn screen_mut(&mut self) -> &mut Screen;

    /// Logical (rotated) width and height
    fn dimensions(&self) -> (u16, u16) {
        let screen = self.screen();
        (screen.width(), screen.height())
    }

    /// Check if the panel has finished its init sequence
    fn is_ready(&self) -> bool;
}

/// Drawing helpers layered on [`Display`]
pub trait DisplayExt: Display {
    /// Fill the whole screen and present it
    fn clear(&mut self, color: u16) -> Result<(), Self::Error> {
        self.screen_mut().fill(color);
        self.show()
    }

    /// Draw `text` horizontally centered on row `y`
    ///
    /// Returns the x coordinate the text started at.
    fn text_centered<G: GlyphSource>(
        &mut self,
        text: &str,
        y: i32,
        style: &TextStyle,
        font: Option<&BitmapFont<'_>>,
        fallback: &mut G,
    ) -> i32 {
        let width = text_width(text, font, style.scale);
        let x = (self.screen().width() as i32 - width) / 2;
        self.screen_mut().draw_text(text, x, y, style, font, fallback);
        x
    }
}

// Blanket implementation for all Display types
impl<T: Display> DisplayExt for T {}
