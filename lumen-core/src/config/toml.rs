//! Simple TOML parser for display configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the display settings file. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Integers in decimal or `0x` hex, with optional `_` separators
//! - Single-line integer arrays: colors = [0x0000, 0xFFFF]
//! - [display] and [palette] section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Floats and datetime values
//! - Inline tables

use heapless::Vec as HVec;

use super::types::{ColorOrder, DisplayConfig, LumenConfig, ThemeConfig};
use crate::canvas::PixelFormat;
use crate::palette::PALETTE_SIZE;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Array longer than the palette
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Palette,
}

/// Parse TOML text into a [`LumenConfig`]
///
/// Missing keys keep their defaults and unknown keys are ignored, so a
/// file only needs to mention what differs from the stock handheld.
pub fn parse_config(input: &str) -> Result<LumenConfig, ParseError> {
    let mut config = LumenConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            match section {
                Section::Display => apply_display(&mut config.display, key, value)?,
                Section::Palette => apply_palette(&mut config.theme, key, value)?,
                Section::Root => {}
            }
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "palette" | "theme" => Ok(Section::Palette),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_display(display: &mut DisplayConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "width" => display.width = parse_int(value)?,
        "height" => display.height = parse_int(value)?,
        "rotation" => {
            let rotation: u8 = parse_int(value)?;
            if rotation > 3 {
                return Err(ParseError::InvalidValue);
            }
            display.rotation = rotation;
        }
        "color_order" => display.color_order = parse_color_order(value)?,
        "format" => display.format = parse_format(value)?,
        "byte_swap" => display.byte_swap = parse_bool(value)?,
        "spi_frequency" => display.spi_frequency = parse_int(value)?,
        _ => {} // Ignore unknown keys
    }
    Ok(())
}

fn apply_palette(theme: &mut ThemeConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "colors" => {
            let colors = parse_int_array(value)?;
            theme.colors[..colors.len()].copy_from_slice(&colors);
        }
        "background" => theme.colors[0] = parse_int(value)?,
        "foreground" => theme.colors[PALETTE_SIZE - 1] = parse_int(value)?,
        _ => {}
    }
    Ok(())
}

/// Split a `key = value` line, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or `0x` hex integer into any type it fits
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let mut digits: HVec<u8, 16> = HVec::new();
    let (body, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    for b in body.bytes().filter(|&b| b != b'_') {
        digits.push(b).map_err(|_| ParseError::InvalidValue)?;
    }
    let text = core::str::from_utf8(&digits).map_err(|_| ParseError::InvalidValue)?;
    let raw = u32::from_str_radix(text, radix).map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_color_order(value: &str) -> Result<ColorOrder, ParseError> {
    match parse_string(value) {
        "rgb" | "RGB" => Ok(ColorOrder::Rgb),
        "bgr" | "BGR" => Ok(ColorOrder::Bgr),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_format(value: &str) -> Result<PixelFormat, ParseError> {
    match parse_string(value) {
        "rgb565" | "full_color" => Ok(PixelFormat::FullColor),
        "indexed4" | "tiny" => Ok(PixelFormat::Indexed4),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a single-line array like `[0x0000, 0x1082, 0xFFFF]`
fn parse_int_array(value: &str) -> Result<HVec<u16, PALETTE_SIZE>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut items = HVec::new();
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        items
            .push(parse_int(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u16>("240"), Ok(240));
        assert_eq!(parse_int::<u16>("0xF800"), Ok(0xF800));
        assert_eq!(parse_int::<u32>("40_000_000"), Ok(40_000_000));
        assert_eq!(parse_int::<u16>("0x10000"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("ten"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("width = 240"), Some(("width", "240")));
        assert_eq!(
            parse_key_value("format = \"indexed4\" # saves RAM"),
            Some(("format", "\"indexed4\""))
        );
        assert_eq!(parse_key_value("width ="), None);
        assert_eq!(parse_key_value("no equals sign"), None);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("display"), Ok(Section::Display));
        assert_eq!(parse_section_header(" palette "), Ok(Section::Palette));
        assert_eq!(parse_section_header("stepper"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_int_array() {
        let colors = parse_int_array("[0x0000, 0x1082, 65535,]").unwrap();
        assert_eq!(colors.as_slice(), &[0x0000, 0x1082, 0xFFFF]);

        assert_eq!(parse_int_array("0x0000, 0x1082"), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_int_array("[0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16]"),
            Err(ParseError::TooManyItems)
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config_str = r#"
# Waveshare 1.14" module
[display]
width = 135
height = 240
rotation = 3
color_order = "bgr"
format = "indexed4"
byte_swap = false
spi_frequency = 62_500_000
backlight = 80

[palette]
colors = [0x0841, 0xF800, 0x07E0]
foreground = 0xFFE0
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.display.width, 135);
        assert_eq!(config.display.rotation, 3);
        assert_eq!(config.display.color_order, ColorOrder::Bgr);
        assert_eq!(config.display.format, PixelFormat::Indexed4);
        assert!(!config.display.byte_swap);
        assert_eq!(config.display.spi_frequency, 62_500_000);

        let palette = config.theme.palette();
        assert_eq!(palette.get(0), 0x0841);
        assert_eq!(palette.get(2), 0x07E0);
        // Entries not listed keep their defaults
        assert_eq!(palette.get(3), crate::palette::DEFAULT_COLORS[3]);
        assert_eq!(palette.get(15), 0xFFE0);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), LumenConfig::default());
    }

    #[test]
    fn test_invalid_rotation() {
        let config_str = "[display]\nrotation = 4\n";
        assert_eq!(parse_config(config_str), Err(ParseError::InvalidValue));
    }
}
