//! Polygons from relative vertex lists
//!
//! Vertices are a flat `[x0, y0, x1, y1, ...]` slice of offsets from the
//! polygon origin. Filled polygons use an even-odd scanline fill.

use heapless::Vec;

use super::walk_line;
use crate::canvas::Canvas;
use crate::screen::Screen;

/// Vertices beyond this count are ignored
pub const MAX_POLYGON_VERTICES: usize = 64;

/// Absolute position of vertex `i`
fn vertex(points: &[i32], i: usize, (x, y): (i64, i64)) -> (i64, i64) {
    (x + i64::from(points[2 * i]), y + i64::from(points[2 * i + 1]))
}

fn line(canvas: &mut Canvas, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: u16) {
    let x_range = (0, i64::from(canvas.width()) - 1);
    let y_range = (0, i64::from(canvas.height()) - 1);
    walk_line((x0, y0), (x1, y1), x_range, y_range, |x, y| {
        canvas.set_pixel(x, y, color)
    });
}

/// Pixel coordinate clamped just outside the canvas on either side
fn to_pixel(value: i64) -> i32 {
    value.clamp(-1, i64::from(u16::MAX) + 1) as i32
}

/// X coordinate where edge `(x1, y1)-(x2, y2)` crosses scanline `row`,
/// rounded to the nearest pixel
///
/// Fixed point with 5 fractional bits; `y1 != y2` is required.
pub fn edge_crossing(x1: i32, y1: i32, x2: i32, y2: i32, row: i32) -> i32 {
    let x = crossing(
        (x1.into(), y1.into()),
        (x2.into(), y2.into()),
        row.into(),
    );
    x.clamp(i32::MIN.into(), i32::MAX.into()) as i32
}

fn crossing((x1, y1): (i64, i64), (x2, y2): (i64, i64), row: i64) -> i64 {
    let (x1, y1, x2, y2, row) = (
        i128::from(x1),
        i128::from(y1),
        i128::from(x2),
        i128::from(y2),
        i128::from(row),
    );
    let x = (32 * x1 + 32 * (x2 - x1) * (row - y1) / (y2 - y1) + 16) / 32;
    x.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

impl Screen {
    /// Polygon at `(x, y)` with vertex offsets `points`
    ///
    /// A trailing unpaired value is ignored. The dirty range is widened to
    /// `[y, y + max(points) + 1)`: the largest of all offsets, x and y
    /// alike. This over-approximates the real extent for most shapes; it is
    /// not a bounding box.
    pub fn polygon(&mut self, points: &[i32], x: i32, y: i32, color: u16, fill: bool) {
        let count = (points.len() / 2).min(MAX_POLYGON_VERTICES);
        if count == 0 {
            return;
        }
        if points.len() / 2 > MAX_POLYGON_VERTICES {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "polygon truncated to {} of {} vertices",
                MAX_POLYGON_VERTICES,
                points.len() / 2
            );
        }
        let points = &points[..count * 2];
        let origin = (i64::from(x), i64::from(y));
        let (canvas, dirty) = self.parts_mut();

        if fill {
            fill_polygon(canvas, points, count, origin, color);
        } else {
            let mut p1 = vertex(points, 0, origin);
            for i in (0..count).rev() {
                let p2 = vertex(points, i, origin);
                line(canvas, p1, p2, color);
                p1 = p2;
            }
        }

        let tallest = points.iter().copied().max().unwrap_or(0);
        dirty.include(y, y.saturating_add(tallest).saturating_add(1));
    }
}

fn fill_polygon(canvas: &mut Canvas, points: &[i32], count: usize, origin: (i64, i64), color: u16) {
    let (mut y_min, mut y_max) = (i64::MAX, i64::MIN);
    for i in 0..count {
        let (_, py) = vertex(points, i, origin);
        y_min = y_min.min(py);
        y_max = y_max.max(py);
    }

    // Only rows that can land on the canvas need scanning
    let first = y_min.max(0);
    let last = y_max.min(i64::from(canvas.height()) - 1);

    let mut nodes: Vec<i64, MAX_POLYGON_VERTICES> = Vec::new();
    for row in first..=last {
        nodes.clear();
        let mut p1 = vertex(points, 0, origin);
        for i in (0..count).rev() {
            let p2 = vertex(points, i, origin);
            let ((_, py1), (_, py2)) = (p1, p2);

            // The bottom pixel of each edge is excluded so shared vertices
            // are not counted twice
            if py1 != py2 && ((py1 > row && py2 <= row) || (py1 <= row && py2 > row)) {
                let _ = nodes.push(crossing(p1, p2, row));
            } else if row == py1.max(py2) {
                // Local minima are missed by the rule above; patch them in
                if py1 < py2 {
                    canvas.set_pixel(to_pixel(p2.0), row as i32, color);
                } else if py2 < py1 {
                    canvas.set_pixel(to_pixel(p1.0), row as i32, color);
                } else {
                    line(canvas, p1, p2, color);
                }
            }
            p1 = p2;
        }

        nodes.sort_unstable();
        for pair in nodes.chunks_exact(2) {
            let (start, end) = (to_pixel(pair[0]), to_pixel(pair[1]));
            canvas.hline(start, row as i32, end - start + 1, color);
        }
    }
}
