//! Drawable screen: canvas plus dirty-range bookkeeping
//!
//! Every drawing primitive in [`crate::raster`], [`crate::text`] and
//! [`crate::blit`] is implemented on [`Screen`] so that it can widen the
//! dirty range as a side effect. The driver reads and resets the range when
//! it pushes pixels to the panel.

use crate::canvas::{Canvas, PixelFormat};

/// Vertical span `[y_min, y_max)` touched since the last flush
///
/// The empty state is the sentinel `y_min = height, y_max = 0`. Between
/// flushes the span only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRange {
    y_min: u16,
    y_max: u16,
    height: u16,
}

impl DirtyRange {
    /// Create an empty range for a canvas of `height` rows
    pub const fn new(height: u16) -> Self {
        Self {
            y_min: height,
            y_max: 0,
            height,
        }
    }

    /// First dirty row
    pub const fn y_min(&self) -> u16 {
        self.y_min
    }

    /// One past the last dirty row
    pub const fn y_max(&self) -> u16 {
        self.y_max
    }

    /// Check if nothing is pending
    pub const fn is_empty(&self) -> bool {
        self.y_min >= self.y_max
    }

    /// Widen the range to cover rows `[start, end)`
    ///
    /// The span is clamped to the canvas first; spans that end up empty
    /// leave the range unchanged.
    pub fn include(&mut self, start: i32, end: i32) {
        let start = start.clamp(0, self.height as i32) as u16;
        let end = end.clamp(0, self.height as i32) as u16;
        if start >= end {
            return;
        }
        self.y_min = self.y_min.min(start);
        self.y_max = self.y_max.max(end);
    }

    /// Mark every row dirty
    pub fn include_all(&mut self) {
        self.y_min = 0;
        self.y_max = self.height;
    }

    /// Pending span clamped to `[0, height)`, or `None` if empty
    pub fn span(&self) -> Option<(u16, u16)> {
        let end = self.y_max.min(self.height);
        if self.y_min >= end {
            None
        } else {
            Some((self.y_min, end))
        }
    }

    /// Return to the empty sentinel
    pub fn reset(&mut self) {
        self.y_min = self.height;
        self.y_max = 0;
    }

    /// Change the canvas height (after a rotation) and reset
    pub(crate) fn resize(&mut self, height: u16) {
        self.height = height;
        self.reset();
    }
}

/// Canvas with dirty tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    canvas: Canvas,
    dirty: DirtyRange,
}

impl Screen {
    /// Wrap a canvas; nothing is dirty yet
    pub fn new(canvas: Canvas) -> Self {
        let dirty = DirtyRange::new(canvas.height());
        Self { canvas, dirty }
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.canvas.width()
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.canvas.height()
    }

    /// Storage format
    pub const fn format(&self) -> PixelFormat {
        self.canvas.format()
    }

    /// Underlying canvas
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Underlying canvas, mutable
    ///
    /// Writes made directly on the canvas are not tracked; call
    /// [`Screen::mark_dirty`] for the rows touched.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Current dirty range
    pub fn dirty(&self) -> &DirtyRange {
        &self.dirty
    }

    /// Widen the dirty range to rows `[start, end)`
    pub fn mark_dirty(&mut self, start: i32, end: i32) {
        self.dirty.include(start, end);
    }

    /// Clear the dirty range after a flush
    pub fn mark_clean(&mut self) {
        self.dirty.reset();
    }

    /// Resize the logical canvas after a rotation
    ///
    /// Everything is marked dirty since the panel's addressing changed.
    pub fn rotate(&mut self, width: u16, height: u16) -> Result<(), crate::CanvasError> {
        self.canvas.reshape(width, height)?;
        self.dirty.resize(height);
        self.dirty.include_all();
        Ok(())
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Canvas, &mut DirtyRange) {
        (&mut self.canvas, &mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_range_is_empty() {
        let range = DirtyRange::new(135);
        assert!(range.is_empty());
        assert_eq!(range.y_min(), 135);
        assert_eq!(range.y_max(), 0);
        assert_eq!(range.span(), None);
    }

    #[test]
    fn test_include_grows() {
        let mut range = DirtyRange::new(240);
        range.include(50, 51);
        range.include(60, 61);
        assert_eq!(range.span(), Some((50, 61)));

        // A span inside the range changes nothing
        range.include(55, 56);
        assert_eq!(range.span(), Some((50, 61)));
    }

    #[test]
    fn test_include_clamps() {
        let mut range = DirtyRange::new(100);
        range.include(-20, 5);
        range.include(90, 400);
        assert_eq!(range.span(), Some((0, 100)));

        let mut range = DirtyRange::new(100);
        range.include(-20, -1);
        range.include(200, 300);
        assert!(range.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut range = DirtyRange::new(10);
        range.include_all();
        assert_eq!(range.span(), Some((0, 10)));
        range.reset();
        assert!(range.is_empty());
    }

    proptest! {
        #[test]
        fn prop_range_never_shrinks(spans in proptest::collection::vec((-50i32..300, 0i32..80), 1..20)) {
            let mut range = DirtyRange::new(240);
            let mut previous: Option<(u16, u16)> = None;
            for (start, len) in spans {
                range.include(start, start + len);
                if let Some((lo, hi)) = range.span() {
                    prop_assert!(lo <= hi);
                    if let Some((plo, phi)) = previous {
                        prop_assert!(lo <= plo && hi >= phi);
                    }
                    previous = Some((lo, hi));
                }
            }
        }
    }
}
