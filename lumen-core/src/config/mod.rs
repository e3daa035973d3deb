//! Configuration types
//!
//! Board-agnostic configuration structures, parsed from a small TOML file
//! on the SD card or stored as postcard binary data in flash.

pub mod toml;
pub mod types;

pub use types::*;

#[cfg(feature = "serde")]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
impl LumenConfig {
    /// Encode for flash storage
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encoding)
    }

    /// Decode a stored configuration
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decoding)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::canvas::PixelFormat;

    #[test]
    fn test_postcard_roundtrip() {
        let mut config = LumenConfig::default();
        config.display.format = PixelFormat::Indexed4;
        config.display.color_order = ColorOrder::Bgr;
        config.theme.colors[5] = 0x1234;

        let bytes = config.to_bytes().unwrap();
        assert_eq!(LumenConfig::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = LumenConfig::default().to_bytes().unwrap();
        assert_eq!(
            LumenConfig::from_bytes(&bytes[..bytes.len() / 2]),
            Err(ConfigError::Decoding)
        );
    }
}
