//! Shape primitives
//!
//! Each primitive draws through the canvas (which clips) and widens the
//! dirty range to cover its own vertical extent. Nothing here can fail:
//! nonsensical sizes are clamped or ignored.

mod ellipse;
mod polygon;
mod scroll;

pub use ellipse::{Quadrants, ELLIPSE_ALL, QUADRANT_1, QUADRANT_2, QUADRANT_3, QUADRANT_4};
pub use polygon::{edge_crossing, MAX_POLYGON_VERTICES};

use crate::screen::Screen;

/// Ellipse, text and bitmap origins are clamped to this magnitude before
/// iterating, which bounds the work any single call can do. Lines and
/// polygons are clipped to the canvas instead.
pub const COORD_LIMIT: i32 = 0x7FFF;

pub(crate) fn clamp_coord(value: i32) -> i32 {
    value.clamp(-COORD_LIMIT, COORD_LIMIT)
}

impl Screen {
    /// Fill the whole screen
    pub fn fill(&mut self, color: u16) {
        let (canvas, dirty) = self.parts_mut();
        canvas.fill(color);
        dirty.include_all();
    }

    /// Single pixel
    pub fn pixel(&mut self, x: i32, y: i32, color: u16) {
        let (canvas, dirty) = self.parts_mut();
        canvas.set_pixel(x, y, color);
        dirty.include(y, y.saturating_add(1));
    }

    /// Horizontal line of `len` pixels starting at `(x, y)`
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: u16) {
        if len <= 0 {
            return;
        }
        let (canvas, dirty) = self.parts_mut();
        canvas.hline(x, y, len, color);
        dirty.include(y, y.saturating_add(1));
    }

    /// Vertical line of `len` pixels starting at `(x, y)`
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: u16) {
        if len <= 0 {
            return;
        }
        let (canvas, dirty) = self.parts_mut();
        canvas.vline(x, y, len, color);
        dirty.include(y, y.saturating_add(len));
    }

    /// Rectangle, outlined or filled
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16, fill: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (canvas, dirty) = self.parts_mut();
        if fill {
            canvas.fill_rect(x, y, w, h, color);
        } else {
            canvas.fill_rect(x, y, w, 1, color);
            canvas.fill_rect(x, y.saturating_add(h - 1), w, 1, color);
            canvas.fill_rect(x, y, 1, h, color);
            canvas.fill_rect(x.saturating_add(w - 1), y, 1, h, color);
        }
        dirty.include(y, y.saturating_add(h));
    }

    /// Line from `(x0, y0)` to `(x1, y1)`, both ends inclusive
    ///
    /// Endpoints may lie anywhere; only the visible part is walked.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let (canvas, dirty) = self.parts_mut();
        let bounds = (canvas.width() as i32, canvas.height() as i32);
        bresenham_clipped(x0, y0, x1, y1, bounds, |x, y| canvas.set_pixel(x, y, color));
        dirty.include(y0.min(y1), y0.max(y1).saturating_add(1));
    }
}

/// Walk the pixels of a line with Bresenham's algorithm
///
/// Visits every pixel from `(x0, y0)` to `(x1, y1)` inclusive, each once.
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, plot: impl FnMut(i32, i32)) {
    walk_line(
        (x0.into(), y0.into()),
        (x1.into(), y1.into()),
        (i64::MIN, i64::MAX),
        (i64::MIN, i64::MAX),
        plot,
    );
}

/// [`bresenham`] restricted to pixels inside `0..width` x `0..height`
///
/// The work done is bounded by the canvas size, not the line length.
pub fn bresenham_clipped(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    (width, height): (i32, i32),
    plot: impl FnMut(i32, i32),
) {
    walk_line(
        (x0.into(), y0.into()),
        (x1.into(), y1.into()),
        (0, i64::from(width) - 1),
        (0, i64::from(height) - 1),
        plot,
    );
}

/// Line walk over wide coordinates
///
/// The pixel at step `i` along the major axis sits `(2 * i * minor + major)
/// / (2 * major)` steps along the minor axis. Steps whose major coordinate
/// falls outside its range are skipped without being visited; pixels whose
/// minor coordinate is out of range are dropped.
pub(crate) fn walk_line(
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    x_range: (i64, i64),
    y_range: (i64, i64),
    mut plot: impl FnMut(i32, i32),
) {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let steep = dy.abs() > dx.abs();
    let (m0, n0, dm, dn, m_range, n_range) = if steep {
        (y0, x0, dy, dx, y_range, x_range)
    } else {
        (x0, y0, dx, dy, x_range, y_range)
    };
    let (sm, sn) = (if dm < 0 { -1 } else { 1 }, dn.signum());
    let (dm, dn) = (dm.abs(), dn.abs());

    // Steps whose major coordinate lands inside m_range
    let (lo, hi) = if sm > 0 {
        (m_range.0.saturating_sub(m0), m_range.1.saturating_sub(m0))
    } else {
        (m0.saturating_sub(m_range.1), m0.saturating_sub(m_range.0))
    };
    let (first, last) = (lo.max(0), hi.min(dm));

    let mut i = first;
    while i <= last {
        let k = if dm == 0 {
            0
        } else {
            ((2 * i128::from(dn) * i128::from(i) + i128::from(dm)) / (2 * i128::from(dm))) as i64
        };
        let (m, n) = (m0 + sm * i, n0 + sn * k);
        if n >= n_range.0 && n <= n_range.1 {
            let (x, y) = if steep { (n, m) } else { (m, n) };
            if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
                plot(x, y);
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelFormat};
    use alloc::vec::Vec;

    fn screen(w: u16, h: u16) -> Screen {
        Screen::new(Canvas::new(w, h, PixelFormat::FullColor).unwrap())
    }

    #[test]
    fn test_fill_marks_everything() {
        let mut s = screen(240, 135);
        s.fill(0xFFFF);
        assert_eq!(s.dirty().span(), Some((0, 135)));
        assert_eq!(s.canvas().get_pixel(239, 134), Some(0xFFFF));
    }

    #[test]
    fn test_fill_idempotent() {
        let mut once = screen(32, 16);
        once.fill(0x1234);
        let mut twice = once.clone();
        twice.fill(0x1234);
        assert_eq!(once.canvas().as_bytes(), twice.canvas().as_bytes());
    }

    #[test]
    fn test_two_pixels_dirty_range() {
        let mut s = screen(240, 135);
        s.pixel(0, 50, 0xFFFF);
        s.pixel(0, 60, 0xFFFF);
        assert_eq!(s.dirty().y_min(), 50);
        assert_eq!(s.dirty().y_max(), 61);
    }

    #[test]
    fn test_offscreen_pixel_leaves_range_empty() {
        let mut s = screen(10, 10);
        s.pixel(3, -4, 0xFFFF);
        s.pixel(3, 10, 0xFFFF);
        assert!(s.dirty().is_empty());
    }

    #[test]
    fn test_rect_outline() {
        let mut s = screen(10, 10);
        s.rect(1, 1, 4, 3, 0xFFFF, false);
        let c = s.canvas();
        assert_eq!(c.get_pixel(1, 1), Some(0xFFFF));
        assert_eq!(c.get_pixel(4, 3), Some(0xFFFF));
        // Interior untouched
        assert_eq!(c.get_pixel(2, 2), Some(0));
        assert_eq!(s.dirty().span(), Some((1, 4)));
    }

    #[test]
    fn test_rect_invalid_size_ignored() {
        let mut s = screen(10, 10);
        s.rect(1, 1, -4, 3, 0xFFFF, true);
        s.rect(1, 1, 4, 0, 0xFFFF, true);
        assert!(s.dirty().is_empty());
        assert!(s.canvas().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_vline_dirty_extent() {
        let mut s = screen(10, 20);
        s.vline(2, 5, 4, 0x0001);
        assert_eq!(s.dirty().span(), Some((5, 9)));
        assert_eq!(s.canvas().get_pixel(2, 8), Some(0x0001));
        assert_eq!(s.canvas().get_pixel(2, 9), Some(0));
    }

    #[test]
    fn test_bresenham_endpoints_and_count() {
        let mut points = Vec::new();
        bresenham(0, 0, 5, 2, |x, y| points.push((x, y)));
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(5, 2)));
        assert_eq!(points.len(), 6);

        let mut steep = Vec::new();
        bresenham(3, 7, 1, 0, |x, y| steep.push((x, y)));
        assert_eq!(steep.first(), Some(&(3, 7)));
        assert_eq!(steep.last(), Some(&(1, 0)));
        assert_eq!(steep.len(), 8);
    }

    #[test]
    fn test_line_dirty_extent_either_direction() {
        let mut s = screen(50, 50);
        s.line(40, 30, 2, 10, 0xFFFF);
        assert_eq!(s.dirty().span(), Some((10, 31)));
        assert_eq!(s.canvas().get_pixel(40, 30), Some(0xFFFF));
        assert_eq!(s.canvas().get_pixel(2, 10), Some(0xFFFF));
    }

    #[test]
    fn test_line_far_endpoint_keeps_slope() {
        let mut s = screen(240, 10);
        s.line(0, 0, 100_000, 100, 0xFFFF);
        let c = s.canvas();
        assert!((0..240).all(|x| c.get_pixel(x, 0) == Some(0xFFFF)));
        assert!((0..240).all(|x| c.get_pixel(x, 1) == Some(0)));
    }

    #[test]
    fn test_clipped_walk_matches_full_walk() {
        let mut full = Vec::new();
        bresenham(-30, 50, 70, -20, |x, y| {
            if (0..40).contains(&x) && (0..30).contains(&y) {
                full.push((x, y));
            }
        });
        let mut clipped = Vec::new();
        bresenham_clipped(-30, 50, 70, -20, (40, 30), |x, y| clipped.push((x, y)));
        assert!(!clipped.is_empty());
        assert_eq!(clipped, full);
    }

    #[test]
    fn test_line_huge_coordinates_do_not_panic() {
        let mut s = screen(20, 20);
        s.line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, 0xFFFF);
        assert_eq!(s.canvas().get_pixel(5, 5), Some(0xFFFF));
    }
}
