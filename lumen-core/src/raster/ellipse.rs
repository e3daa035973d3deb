//! Midpoint ellipse
//!
//! Points are generated for one quadrant and mirrored into the others, so
//! callers can draw any subset of quadrants (rounded corners, arcs).

use super::clamp_coord;
use crate::canvas::Canvas;
use crate::screen::Screen;

/// Bit set of ellipse quadrants
pub type Quadrants = u8;

/// Top right
pub const QUADRANT_1: Quadrants = 0x01;
/// Top left
pub const QUADRANT_2: Quadrants = 0x02;
/// Bottom left
pub const QUADRANT_3: Quadrants = 0x04;
/// Bottom right
pub const QUADRANT_4: Quadrants = 0x08;
/// Whole ellipse
pub const ELLIPSE_ALL: Quadrants = QUADRANT_1 | QUADRANT_2 | QUADRANT_3 | QUADRANT_4;

#[allow(clippy::too_many_arguments)]
fn plot_points(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    x: i32,
    y: i32,
    color: u16,
    fill: bool,
    mask: Quadrants,
) {
    if fill {
        if mask & QUADRANT_1 != 0 {
            canvas.hline(cx, cy - y, x + 1, color);
        }
        if mask & QUADRANT_2 != 0 {
            canvas.hline(cx - x, cy - y, x + 1, color);
        }
        if mask & QUADRANT_3 != 0 {
            canvas.hline(cx - x, cy + y, x + 1, color);
        }
        if mask & QUADRANT_4 != 0 {
            canvas.hline(cx, cy + y, x + 1, color);
        }
    } else {
        if mask & QUADRANT_1 != 0 {
            canvas.set_pixel(cx + x, cy - y, color);
        }
        if mask & QUADRANT_2 != 0 {
            canvas.set_pixel(cx - x, cy - y, color);
        }
        if mask & QUADRANT_3 != 0 {
            canvas.set_pixel(cx - x, cy + y, color);
        }
        if mask & QUADRANT_4 != 0 {
            canvas.set_pixel(cx + x, cy + y, color);
        }
    }
}

impl Screen {
    /// Ellipse centred on `(cx, cy)` with radii `rx`, `ry`
    pub fn ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: u16, fill: bool) {
        self.ellipse_quadrants(cx, cy, rx, ry, color, fill, ELLIPSE_ALL);
    }

    /// Ellipse restricted to the quadrants set in `mask`
    ///
    /// Negative radii are treated as zero.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse_quadrants(
        &mut self,
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
        color: u16,
        fill: bool,
        mask: Quadrants,
    ) {
        let (cx, cy) = (clamp_coord(cx), clamp_coord(cy));
        let rx = clamp_coord(rx).max(0);
        let ry = clamp_coord(ry).max(0);
        let (canvas, dirty) = self.parts_mut();

        if rx == 0 && ry == 0 {
            if mask & ELLIPSE_ALL != 0 {
                canvas.set_pixel(cx, cy, color);
                dirty.include(cy, cy + 1);
            }
            return;
        }

        // Products of three radii overflow i32 for large ellipses
        let (a, b) = (rx as i64, ry as i64);
        let two_a2 = 2 * a * a;
        let two_b2 = 2 * b * b;

        // First set: shallow part of the curve, stepping y
        let mut x = a;
        let mut y = 0i64;
        let mut x_change = b * b * (1 - 2 * a);
        let mut y_change = a * a;
        let mut error = 0i64;
        let mut stop_x = two_b2 * a;
        let mut stop_y = 0i64;
        while stop_x >= stop_y {
            plot_points(canvas, cx, cy, x as i32, y as i32, color, fill, mask);
            y += 1;
            stop_y += two_a2;
            error += y_change;
            y_change += two_a2;
            if 2 * error + x_change > 0 {
                x -= 1;
                stop_x -= two_b2;
                error += x_change;
                x_change += two_b2;
            }
        }

        // Second set: steep part of the curve, stepping x
        x = 0;
        y = b;
        x_change = b * b;
        y_change = a * a * (1 - 2 * b);
        error = 0;
        stop_x = 0;
        stop_y = two_a2 * b;
        while stop_x <= stop_y {
            plot_points(canvas, cx, cy, x as i32, y as i32, color, fill, mask);
            x += 1;
            stop_x += two_b2;
            error += x_change;
            x_change += two_b2;
            if 2 * error + y_change > 0 {
                y -= 1;
                stop_y -= two_a2;
                error += y_change;
                y_change += two_a2;
            }
        }

        dirty.include(cy - ry, cy + ry + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelFormat;

    fn screen(w: u16, h: u16) -> Screen {
        Screen::new(Canvas::new(w, h, PixelFormat::Indexed4).unwrap())
    }

    #[test]
    fn test_circle_extremes() {
        let mut s = screen(32, 32);
        s.ellipse(16, 16, 5, 5, 0xF, false);
        let c = s.canvas();
        assert_eq!(c.get_pixel(21, 16), Some(0xF));
        assert_eq!(c.get_pixel(11, 16), Some(0xF));
        assert_eq!(c.get_pixel(16, 11), Some(0xF));
        assert_eq!(c.get_pixel(16, 21), Some(0xF));
        assert_eq!(c.get_pixel(16, 16), Some(0x0));
        assert_eq!(s.dirty().span(), Some((11, 22)));
    }

    #[test]
    fn test_filled_ellipse_covers_centre() {
        let mut s = screen(32, 32);
        s.ellipse(10, 10, 6, 3, 0x7, true);
        let c = s.canvas();
        assert_eq!(c.get_pixel(10, 10), Some(0x7));
        assert_eq!(c.get_pixel(4, 10), Some(0x7));
        assert_eq!(c.get_pixel(16, 10), Some(0x7));
        assert_eq!(c.get_pixel(10, 14), Some(0x0));
    }

    #[test]
    fn test_quadrant_mask() {
        let mut s = screen(32, 32);
        s.ellipse_quadrants(16, 16, 4, 4, 0x1, false, QUADRANT_1);
        let c = s.canvas();
        assert_eq!(c.get_pixel(20, 16), Some(0x1));
        assert_eq!(c.get_pixel(16, 12), Some(0x1));
        assert_eq!(c.get_pixel(12, 16), Some(0x0));
        assert_eq!(c.get_pixel(16, 20), Some(0x0));
    }

    #[test]
    fn test_zero_radius_is_a_point() {
        let mut s = screen(8, 8);
        s.ellipse(3, 4, 0, 0, 0x2, false);
        assert_eq!(s.canvas().get_pixel(3, 4), Some(0x2));
        assert_eq!(s.dirty().span(), Some((4, 5)));
    }

    #[test]
    fn test_partially_offscreen() {
        let mut s = screen(16, 16);
        s.ellipse(0, 0, 40, 40, 0x3, true);
        s.ellipse(-100, 300, 10, 10, 0x3, false);
        assert_eq!(s.canvas().get_pixel(15, 15), Some(0x3));
        assert_eq!(s.dirty().span(), Some((0, 16)));
    }
}
