//! Per-panel rotation tables
//!
//! ST7789 controllers have 240x320 of RAM but are glued to smaller glass
//! at various offsets. Each supported panel gets four rows, one per
//! quarter turn, giving the MADCTL value, the logical size at that
//! rotation and where the visible window starts in controller RAM.

use lumen_core::config::{ColorOrder, ConfigError};

use super::commands::MADCTL_BGR;

/// One rotation of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationEntry {
    pub madctl: u8,
    pub width: u16,
    pub height: u16,
    pub x_offset: u16,
    pub y_offset: u16,
}

impl RotationEntry {
    const fn new(madctl: u8, width: u16, height: u16, x_offset: u16, y_offset: u16) -> Self {
        Self {
            madctl,
            width,
            height,
            x_offset,
            y_offset,
        }
    }

    /// MADCTL value including the color order bit
    pub const fn madctl_value(&self, order: ColorOrder) -> u8 {
        match order {
            ColorOrder::Rgb => self.madctl,
            ColorOrder::Bgr => self.madctl | MADCTL_BGR,
        }
    }
}

/// Rotation rows for a physical panel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelTable {
    /// Physical width at rotation 0
    pub width: u16,
    /// Physical height at rotation 0
    pub height: u16,
    pub rotations: [RotationEntry; 4],
}

impl PanelTable {
    /// Entry for rotation `n`, taken modulo 4
    pub const fn entry(&self, n: u8) -> &RotationEntry {
        &self.rotations[rotation_index(n)]
    }
}

/// Table row for rotation `n`
pub const fn rotation_index(n: u8) -> usize {
    (n % 4) as usize
}

/// Panels with known geometry
pub static PANELS: [PanelTable; 5] = [
    PanelTable {
        width: 240,
        height: 320,
        rotations: [
            RotationEntry::new(0x00, 240, 320, 0, 0),
            RotationEntry::new(0x60, 320, 240, 0, 0),
            RotationEntry::new(0xC0, 240, 320, 0, 0),
            RotationEntry::new(0xA0, 320, 240, 0, 0),
        ],
    },
    PanelTable {
        width: 170,
        height: 320,
        rotations: [
            RotationEntry::new(0x00, 170, 320, 35, 0),
            RotationEntry::new(0x60, 320, 170, 0, 35),
            RotationEntry::new(0xC0, 170, 320, 35, 0),
            RotationEntry::new(0xA0, 320, 170, 0, 35),
        ],
    },
    PanelTable {
        width: 240,
        height: 240,
        rotations: [
            RotationEntry::new(0x00, 240, 240, 0, 0),
            RotationEntry::new(0x60, 240, 240, 0, 0),
            RotationEntry::new(0xC0, 240, 240, 0, 80),
            RotationEntry::new(0xA0, 240, 240, 80, 0),
        ],
    },
    PanelTable {
        width: 135,
        height: 240,
        rotations: [
            RotationEntry::new(0x00, 135, 240, 52, 40),
            RotationEntry::new(0x60, 240, 135, 40, 53),
            RotationEntry::new(0xC0, 135, 240, 53, 40),
            RotationEntry::new(0xA0, 240, 135, 40, 52),
        ],
    },
    PanelTable {
        width: 128,
        height: 128,
        rotations: [
            RotationEntry::new(0x00, 128, 128, 2, 1),
            RotationEntry::new(0x60, 128, 128, 1, 2),
            RotationEntry::new(0xC0, 128, 128, 2, 3),
            RotationEntry::new(0xA0, 128, 128, 3, 2),
        ],
    },
];

/// Find the rotation table for a physical panel size
pub fn lookup(width: u16, height: u16) -> Result<&'static PanelTable, ConfigError> {
    PANELS
        .iter()
        .find(|p| p.width == width && p.height == height)
        .ok_or(ConfigError::UnsupportedPanel { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(rotation_index(0), 0);
        assert_eq!(rotation_index(3), 3);
        assert_eq!(rotation_index(4), 0);
        assert_eq!(rotation_index(7), 3);
    }

    #[test]
    fn test_lookup() {
        let panel = lookup(135, 240).unwrap();
        let entry = panel.entry(1);
        assert_eq!((entry.width, entry.height), (240, 135));
        assert_eq!((entry.x_offset, entry.y_offset), (40, 53));

        assert_eq!(
            lookup(100, 100),
            Err(ConfigError::UnsupportedPanel {
                width: 100,
                height: 100
            })
        );
    }

    #[test]
    fn test_madctl_color_order() {
        let entry = lookup(240, 320).unwrap().entry(1);
        assert_eq!(entry.madctl_value(ColorOrder::Rgb), 0x60);
        assert_eq!(entry.madctl_value(ColorOrder::Bgr), 0x68);
    }

    #[test]
    fn test_tables_preserve_pixel_count() {
        for panel in PANELS.iter() {
            let area = panel.width as u32 * panel.height as u32;
            for entry in panel.rotations.iter() {
                assert_eq!(entry.width as u32 * entry.height as u32, area);
            }
        }
    }
}
