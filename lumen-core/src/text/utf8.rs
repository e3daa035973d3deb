//! Leading-byte UTF-8 width classification
//!
//! Text measured here is assumed to be drawn with the fallback font, where
//! ASCII occupies one cell and everything else occupies two. Only the
//! leading byte of each sequence is inspected; malformed input is never
//! rejected, it just measures oddly.

use super::fallback::CELL_WIDTH;

/// Role of a byte within a UTF-8 stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LeadByte {
    /// No leading ones: ASCII, one cell
    Single,
    /// Two or more leading ones: start of a multi-byte character, two cells
    Double,
    /// `10xxxxxx`: continuation, no cells of its own
    Continuation,
}

impl LeadByte {
    /// Cells this byte contributes
    pub const fn cells(self) -> usize {
        match self {
            LeadByte::Single => 1,
            LeadByte::Double => 2,
            LeadByte::Continuation => 0,
        }
    }
}

/// Classify a byte by its count of leading one bits
pub const fn classify_lead_byte(byte: u8) -> LeadByte {
    match byte.leading_ones() {
        0 => LeadByte::Single,
        1 => LeadByte::Continuation,
        _ => LeadByte::Double,
    }
}

/// Number of fallback cells needed for `bytes`
pub fn cell_count(bytes: &[u8]) -> usize {
    bytes.iter().map(|&b| classify_lead_byte(b).cells()).sum()
}

/// Width in pixels of `text` rendered with the unscaled fallback font
pub fn measure_width(text: &str) -> i32 {
    (cell_count(text.as_bytes()) * CELL_WIDTH as usize) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_lead_byte() {
        assert_eq!(classify_lead_byte(b'A'), LeadByte::Single);
        assert_eq!(classify_lead_byte(0x00), LeadByte::Single);
        assert_eq!(classify_lead_byte(0x7F), LeadByte::Single);
        assert_eq!(classify_lead_byte(0x80), LeadByte::Continuation);
        assert_eq!(classify_lead_byte(0xBF), LeadByte::Continuation);
        assert_eq!(classify_lead_byte(0xC3), LeadByte::Double);
        assert_eq!(classify_lead_byte(0xE4), LeadByte::Double);
        assert_eq!(classify_lead_byte(0xF0), LeadByte::Double);
    }

    #[test]
    fn test_measure_width() {
        assert_eq!(measure_width(""), 0);
        assert_eq!(measure_width("abc"), 12);
        // Two-byte and three-byte characters are both two cells
        assert_eq!(measure_width("é"), 8);
        assert_eq!(measure_width("中文"), 16);
        assert_eq!(measure_width("a中"), 12);
    }

    #[test]
    fn test_cell_count_raw_bytes() {
        // A stray continuation byte counts for nothing
        assert_eq!(cell_count(&[0x80, b'x']), 1);
    }

    proptest! {
        #[test]
        fn prop_measure_width_additive(a in ".{0,16}", b in ".{0,16}") {
            let mut joined = alloc::string::String::from(a.as_str());
            joined.push_str(&b);
            prop_assert_eq!(measure_width(&joined), measure_width(&a) + measure_width(&b));
        }
    }
}
