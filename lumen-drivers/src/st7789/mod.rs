//! ST7789 TFT panel driver
//!
//! The driver owns the [`Screen`] and pushes only the rows the dirty range
//! covers. Canvases in 4-bit mode are expanded through the palette one
//! scanline at a time into a small line buffer, so the full-color frame
//! never exists in RAM.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized -> HardReset -> Initializing -> RotationSet -> Ready
//! ```
//!
//! [`St7789::show`] refuses to run before `Ready`.

pub mod commands;
pub mod interface;
pub mod rotation;

pub use commands::{cmd, InitCommand, INIT_PASSES, INIT_SEQUENCE};
pub use interface::{CommandBus, SpiInterface};
pub use rotation::{lookup, PanelTable, RotationEntry};

use alloc::vec::Vec;

use lumen_core::config::{ColorOrder, ConfigError, DisplayConfig};
use lumen_core::traits::Display;
use lumen_core::{Canvas, CanvasError, Palette, PixelFormat, Screen};
use lumen_hal::spi::{Mode, SpiConfig};
use lumen_hal::{DelayMs, OutputPin};

use commands::{address_payload, vscrdef_payload};

/// Reset line held high before the pulse
pub const RESET_SETTLE_MS: u32 = 10;
/// Reset pulse width
pub const RESET_LOW_MS: u32 = 10;
/// Wait after reset before the controller accepts commands
pub const RESET_POST_MS: u32 = 120;

/// Wait after SLPIN before the next command
const SLEEP_IN_MS: u32 = 5;
/// Wait after SLPOUT for the supply to stabilize
const SLEEP_OUT_MS: u32 = 120;

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    #[default]
    Uninitialized,
    HardReset,
    Initializing,
    RotationSet,
    Ready,
}

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// Transfer failed on the bus
    Bus(E),
    /// `show` called before init finished
    NotReady,
    /// Rotated size does not fit the framebuffer
    Canvas(CanvasError),
}

/// SPI settings for a panel
pub fn spi_config(config: &DisplayConfig) -> SpiConfig {
    SpiConfig {
        frequency: config.spi_frequency,
        mode: Mode::Mode0,
    }
}

/// ST7789 driver
///
/// `P` is anything that can lend a [`Palette`]: an owned palette, a
/// reference to a shared theme, or a smart pointer.
pub struct St7789<BUS, RST, DELAY, P = Palette> {
    bus: BUS,
    reset: RST,
    delay: DELAY,
    palette: P,
    screen: Screen,
    panel: &'static PanelTable,
    rotation: u8,
    color_order: ColorOrder,
    x_offset: u16,
    y_offset: u16,
    state: DriverState,
    /// One expanded scanline, only used in 4-bit mode
    line_buffer: Vec<u8>,
}

impl<BUS, RST, DELAY, P> St7789<BUS, RST, DELAY, P>
where
    BUS: CommandBus,
    RST: OutputPin,
    DELAY: DelayMs,
    P: core::borrow::Borrow<Palette>,
{
    /// Create a driver for the panel described by `config`
    ///
    /// Allocates the framebuffer at the configured rotation. Fails if the
    /// panel size has no rotation table or memory runs out. No bus traffic
    /// happens until [`St7789::init`].
    pub fn new(
        config: &DisplayConfig,
        bus: BUS,
        reset: RST,
        delay: DELAY,
        palette: P,
    ) -> Result<Self, ConfigError> {
        let panel = rotation::lookup(config.width, config.height)?;
        let entry = panel.entry(config.rotation);

        let canvas = Canvas::new(entry.width, entry.height, config.format)?
            .with_byte_swap(config.byte_swap);

        let mut line_buffer = Vec::new();
        if config.format == PixelFormat::Indexed4 {
            let longest = panel.width.max(panel.height) as usize * 2;
            line_buffer
                .try_reserve_exact(longest)
                .map_err(|_| ConfigError::OutOfMemory)?;
            line_buffer.resize(longest, 0);
        }

        Ok(Self {
            bus,
            reset,
            delay,
            palette,
            screen: Screen::new(canvas),
            panel,
            rotation: rotation::rotation_index(config.rotation) as u8,
            color_order: config.color_order,
            x_offset: entry.x_offset,
            y_offset: entry.y_offset,
            state: DriverState::Uninitialized,
            line_buffer,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Current rotation (0-3)
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Window origin in controller RAM
    pub fn offsets(&self) -> (u16, u16) {
        (self.x_offset, self.y_offset)
    }

    pub fn palette(&self) -> &Palette {
        core::borrow::Borrow::borrow(&self.palette)
    }

    /// Give the bus, pins and palette back
    pub fn release(self) -> (BUS, RST, DELAY, P) {
        (self.bus, self.reset, self.delay, self.palette)
    }

    /// Pulse the reset line
    pub fn hard_reset(&mut self) {
        self.state = DriverState::HardReset;
        #[cfg(feature = "defmt")]
        defmt::debug!("ST7789: hard reset");

        self.reset.set_high();
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.reset.set_low();
        self.delay.delay_ms(RESET_LOW_MS);
        self.reset.set_high();
        self.delay.delay_ms(RESET_POST_MS);
    }

    /// Reset and configure the panel with the stock startup table
    pub fn init(&mut self) -> Result<(), DriverError<BUS::Error>> {
        self.init_with(&INIT_SEQUENCE, INIT_PASSES)
    }

    /// Reset and configure the panel with a custom table
    ///
    /// The table is sent `passes` times, then the configured rotation is
    /// applied and the whole screen is marked dirty.
    pub fn init_with(
        &mut self,
        commands: &[InitCommand],
        passes: u8,
    ) -> Result<(), DriverError<BUS::Error>> {
        self.hard_reset();
        self.state = DriverState::Initializing;

        for _pass in 0..passes {
            #[cfg(feature = "defmt")]
            defmt::debug!("ST7789: init pass {}", _pass + 1);
            self.run_commands(commands)?;
        }

        self.set_rotation(self.rotation)?;
        self.state = DriverState::Ready;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "ST7789 ready: {}x{} rotation {}",
            self.screen.width(),
            self.screen.height(),
            self.rotation
        );
        Ok(())
    }

    /// Send a command table without touching driver state
    pub fn run_commands(&mut self, commands: &[InitCommand]) -> Result<(), DriverError<BUS::Error>> {
        for command in commands {
            self.command(command.opcode, command.params)?;
            if command.delay_ms > 0 {
                self.delay.delay_ms(command.delay_ms);
            }
        }
        Ok(())
    }

    fn command(&mut self, opcode: u8, params: &[u8]) -> Result<(), DriverError<BUS::Error>> {
        self.bus
            .write_command(opcode, params)
            .map_err(DriverError::Bus)
    }

    /// Rotate to `n` quarter turns (taken modulo 4)
    ///
    /// Updates MADCTL, the logical size and the RAM offsets. The canvas is
    /// reinterpreted, not redrawn, so the caller repaints.
    pub fn set_rotation(&mut self, n: u8) -> Result<(), DriverError<BUS::Error>> {
        let entry = *self.panel.entry(n);
        self.command(cmd::MADCTL, &[entry.madctl_value(self.color_order)])?;
        self.screen
            .rotate(entry.width, entry.height)
            .map_err(DriverError::Canvas)?;

        self.rotation = rotation::rotation_index(n) as u8;
        self.x_offset = entry.x_offset;
        self.y_offset = entry.y_offset;
        if self.state != DriverState::Ready {
            self.state = DriverState::RotationSet;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ST7789: rotation {} -> {}x{} offset ({}, {})",
            self.rotation,
            entry.width,
            entry.height,
            entry.x_offset,
            entry.y_offset
        );
        Ok(())
    }

    /// Open the inclusive window `[x0, x1] x [y0, y1]` for a memory write
    ///
    /// Coordinates are logical; the panel offsets are added here.
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DriverError<BUS::Error>> {
        let (dx, dy) = (self.x_offset, self.y_offset);
        self.command(cmd::CASET, &address_payload(x0 + dx, x1 + dx))?;
        self.command(cmd::RASET, &address_payload(y0 + dy, y1 + dy))?;
        self.command(cmd::RAMWR, &[])
    }

    /// Enter or leave sleep mode
    pub fn sleep_mode(&mut self, sleep: bool) -> Result<(), DriverError<BUS::Error>> {
        if sleep {
            self.command(cmd::SLPIN, &[])?;
            self.delay.delay_ms(SLEEP_IN_MS);
        } else {
            self.command(cmd::SLPOUT, &[])?;
            self.delay.delay_ms(SLEEP_OUT_MS);
        }
        Ok(())
    }

    /// Turn color inversion on or off
    pub fn inversion_mode(&mut self, invert: bool) -> Result<(), DriverError<BUS::Error>> {
        let opcode = if invert { cmd::INVON } else { cmd::INVOFF };
        self.command(opcode, &[])
    }

    /// Define the hardware scroll area: top fixed, scrolling, bottom fixed
    pub fn vscrdef(&mut self, tfa: u16, vsa: u16, bfa: u16) -> Result<(), DriverError<BUS::Error>> {
        self.command(cmd::VSCRDEF, &vscrdef_payload(tfa, vsa, bfa))
    }

    /// Set the first line shown in the scroll area
    pub fn vscsad(&mut self, line: u16) -> Result<(), DriverError<BUS::Error>> {
        self.command(cmd::VSCSAD, &line.to_be_bytes())
    }

    /// Push the dirty rows to the panel
    ///
    /// An empty dirty range sends nothing. Afterwards the range is empty.
    pub fn show(&mut self) -> Result<(), DriverError<BUS::Error>> {
        if self.state != DriverState::Ready {
            return Err(DriverError::NotReady);
        }
        let Some((y0, y1)) = self.screen.dirty().span() else {
            return Ok(());
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("ST7789: show rows {}..{}", y0, y1);

        let width = self.screen.width();
        self.set_window(0, y0, width - 1, y1 - 1)?;

        let canvas = self.screen.canvas();
        match canvas.format() {
            PixelFormat::FullColor => {
                self.bus
                    .write_pixels(canvas.rows(y0, y1))
                    .map_err(DriverError::Bus)?;
            }
            PixelFormat::Indexed4 => {
                let palette: &Palette = core::borrow::Borrow::borrow(&self.palette);
                for y in y0..y1 {
                    let len = canvas.expand_row(y, palette, &mut self.line_buffer);
                    self.bus
                        .write_pixels(&self.line_buffer[..len])
                        .map_err(DriverError::Bus)?;
                }
            }
        }

        self.screen.mark_clean();
        Ok(())
    }
}

impl<BUS, RST, DELAY, P> St7789<BUS, RST, DELAY, P>
where
    P: core::borrow::BorrowMut<Palette>,
{
    /// Palette, mutable
    ///
    /// Changes show up in 4-bit mode on the next flush of each row; mark
    /// the screen dirty to repaint everything.
    pub fn palette_mut(&mut self) -> &mut Palette {
        core::borrow::BorrowMut::borrow_mut(&mut self.palette)
    }
}

impl<BUS, RST, DELAY, P> Display for St7789<BUS, RST, DELAY, P>
where
    BUS: CommandBus,
    RST: OutputPin,
    DELAY: DelayMs,
    P: core::borrow::Borrow<Palette>,
{
    type Error = DriverError<BUS::Error>;

    fn show(&mut self) -> Result<(), Self::Error> {
        St7789::show(self)
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }

    fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    fn is_ready(&self) -> bool {
        self.state == DriverState::Ready
    }
}
