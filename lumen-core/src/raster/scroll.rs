//! Scrolling and raw image blits

use crate::canvas::RawImage;
use crate::screen::Screen;

impl Screen {
    /// Shift the canvas content by `(dx, dy)` pixels
    ///
    /// Pixels scrolled in from outside keep whatever the buffer held before;
    /// callers redraw the revealed strip. The whole screen is marked dirty.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let width = self.width() as i32;
        let height = self.height() as i32;
        let (canvas, dirty) = self.parts_mut();
        dirty.include_all();

        // Walk against the shift direction so no source pixel is
        // overwritten before it has been copied
        let (x_start, x_end, x_step) = if dx < 0 {
            (0, width + dx, 1)
        } else {
            (width - 1, dx - 1, -1)
        };
        if (x_step == 1 && x_end <= 0) || (x_step == -1 && x_end >= x_start) {
            return;
        }
        let (y_start, y_end, y_step) = if dy < 0 {
            (0, height + dy, 1)
        } else {
            (height - 1, dy - 1, -1)
        };
        if (y_step == 1 && y_end <= 0) || (y_step == -1 && y_end >= y_start) {
            return;
        }

        let mut y = y_start;
        while y != y_end {
            let mut x = x_start;
            while x != x_end {
                let color = canvas.fetch((x - dx) as usize, (y - dy) as usize);
                canvas.put(x as usize, y as usize, color);
                x += x_step;
            }
            y += y_step;
        }
    }

    /// Copy a pre-rendered image to `(x, y)`
    ///
    /// `image` must be in the canvas's own format. Pixels equal to `key`
    /// (compared in canonical form) are skipped.
    pub fn blit_buffer(&mut self, image: &RawImage<'_>, x: i32, y: i32, key: Option<u16>) {
        let (canvas, dirty) = self.parts_mut();
        for row in 0..image.height as usize {
            for col in 0..image.width as usize {
                let Some(color) = canvas.decode_raw(image, col, row) else {
                    continue;
                };
                if Some(color) == key {
                    continue;
                }
                canvas.set_pixel(x + col as i32, y + row as i32, color);
            }
        }
        dirty.include(y, y.saturating_add(image.height as i32));
    }
}
