//! ST7789 command set and startup table

/// ST7789 command opcodes
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Sleep in
    pub const SLPIN: u8 = 0x10;
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Normal display mode on
    pub const NORON: u8 = 0x13;
    /// Inversion off
    pub const INVOFF: u8 = 0x20;
    /// Inversion on
    pub const INVON: u8 = 0x21;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Row address set
    pub const RASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Vertical scrolling definition
    pub const VSCRDEF: u8 = 0x33;
    /// Memory data access control (rotation, color order)
    pub const MADCTL: u8 = 0x36;
    /// Vertical scroll start address
    pub const VSCSAD: u8 = 0x37;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
    /// Porch setting
    pub const PORCTRL: u8 = 0xB2;
    /// Display function control
    pub const DFC: u8 = 0xB6;
    /// Gate control
    pub const GCTRL: u8 = 0xB7;
    /// VCOM setting
    pub const VCOMS: u8 = 0xBB;
    /// LCM control
    pub const LCMCTRL: u8 = 0xC0;
    /// VDV and VRH command enable
    pub const VDVVRHEN: u8 = 0xC2;
    /// VRH set
    pub const VRHS: u8 = 0xC3;
    /// VDV set
    pub const VDVS: u8 = 0xC4;
    /// Frame rate control in normal mode
    pub const FRCTRL2: u8 = 0xC6;
    /// Power control 1
    pub const PWCTRL1: u8 = 0xD0;
    /// Positive voltage gamma
    pub const PVGAMCTRL: u8 = 0xE0;
    /// Negative voltage gamma
    pub const NVGAMCTRL: u8 = 0xE1;
}

/// MADCTL bit selecting BGR subpixel order
pub const MADCTL_BGR: u8 = 0x08;

/// COLMOD value for 16 bits per pixel
pub const COLMOD_RGB565: u8 = 0x55;

/// One step of an init sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitCommand {
    pub opcode: u8,
    pub params: &'static [u8],
    /// Wait after the command, in milliseconds
    pub delay_ms: u32,
}

impl InitCommand {
    pub const fn new(opcode: u8, params: &'static [u8], delay_ms: u32) -> Self {
        Self {
            opcode,
            params,
            delay_ms,
        }
    }
}

/// Number of times the startup table is sent
///
/// Some panels come up with garbled gamma after a single pass.
pub const INIT_PASSES: u8 = 2;

/// Startup table for 240x320-class ST7789 panels
pub const INIT_SEQUENCE: [InitCommand; 19] = [
    InitCommand::new(cmd::SWRESET, &[], 150),
    InitCommand::new(cmd::SLPOUT, &[], 120),
    InitCommand::new(cmd::NORON, &[], 0),
    InitCommand::new(cmd::DFC, &[0x0A, 0x82], 0),
    InitCommand::new(cmd::COLMOD, &[COLMOD_RGB565], 10),
    InitCommand::new(cmd::PORCTRL, &[0x0C, 0x0C, 0x00, 0x33, 0x33], 0),
    InitCommand::new(cmd::GCTRL, &[0x35], 0),
    InitCommand::new(cmd::VCOMS, &[0x28], 0),
    InitCommand::new(cmd::LCMCTRL, &[0x0C], 0),
    InitCommand::new(cmd::VDVVRHEN, &[0x01, 0xFF], 0),
    InitCommand::new(cmd::VRHS, &[0x10], 0),
    InitCommand::new(cmd::VDVS, &[0x20], 0),
    InitCommand::new(cmd::FRCTRL2, &[0x0F], 0),
    InitCommand::new(cmd::PWCTRL1, &[0xA4, 0xA1], 0),
    InitCommand::new(
        cmd::PVGAMCTRL,
        &[
            0xD0, 0x00, 0x02, 0x07, 0x0A, 0x28, 0x32, 0x44, 0x42, 0x06, 0x0E, 0x12, 0x14, 0x17,
        ],
        0,
    ),
    InitCommand::new(
        cmd::NVGAMCTRL,
        &[
            0xD0, 0x00, 0x02, 0x07, 0x0A, 0x28, 0x31, 0x54, 0x47, 0x0E, 0x1C, 0x17, 0x1B, 0x1E,
        ],
        0,
    ),
    InitCommand::new(cmd::INVON, &[], 0),
    InitCommand::new(cmd::MADCTL, &[0x00], 0),
    InitCommand::new(cmd::DISPON, &[], 120),
];

/// CASET/RASET payload for the inclusive span `[start, end]`
///
/// Both addresses are sent big-endian.
pub const fn address_payload(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

/// VSCRDEF payload: top fixed area, scroll area, bottom fixed area
pub const fn vscrdef_payload(tfa: u16, vsa: u16, bfa: u16) -> [u8; 6] {
    let [t_hi, t_lo] = tfa.to_be_bytes();
    let [v_hi, v_lo] = vsa.to_be_bytes();
    let [b_hi, b_lo] = bfa.to_be_bytes();
    [t_hi, t_lo, v_hi, v_lo, b_hi, b_lo]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_payload() {
        assert_eq!(address_payload(0, 239), [0x00, 0x00, 0x00, 0xEF]);
        assert_eq!(address_payload(40, 279), [0x00, 0x28, 0x01, 0x17]);
    }

    #[test]
    fn test_vscrdef_payload() {
        assert_eq!(
            vscrdef_payload(0, 320, 0),
            [0x00, 0x00, 0x01, 0x40, 0x00, 0x00]
        );
    }

    #[test]
    fn test_init_sequence_shape() {
        assert_eq!(INIT_SEQUENCE.len(), 19);
        assert_eq!(INIT_SEQUENCE[0].opcode, cmd::SWRESET);
        assert_eq!(INIT_SEQUENCE[18].opcode, cmd::DISPON);

        // Pixel format must be 16-bit for the framebuffer layout
        let colmod = INIT_SEQUENCE
            .iter()
            .find(|c| c.opcode == cmd::COLMOD)
            .unwrap();
        assert_eq!(colmod.params, &[COLMOD_RGB565]);

        let gamma: usize = INIT_SEQUENCE
            .iter()
            .filter(|c| c.opcode == cmd::PVGAMCTRL || c.opcode == cmd::NVGAMCTRL)
            .map(|c| c.params.len())
            .sum();
        assert_eq!(gamma, 28);
    }
}
