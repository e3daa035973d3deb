//! Command/data SPI interface
//!
//! The ST7789 distinguishes commands from parameters and pixel data by the
//! level of the D/C pin, sampled with each byte:
//!
//! ```text
//! CS  ‾‾\________________________/‾‾
//! DC  ____/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾   low = command, high = data
//! SDA   [op] [p0 p1 ... pn]
//! ```

use lumen_hal::{NoPin, OutputPin, SpiBus};

/// Transport that can send controller commands and pixel data
pub trait CommandBus {
    /// Bus error
    type Error;

    /// Send `opcode` with D/C low, then `params` (if any) with D/C high
    fn write_command(&mut self, opcode: u8, params: &[u8]) -> Result<(), Self::Error>;

    /// Stream pixel bytes with D/C high
    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<B: CommandBus> CommandBus for &mut B {
    type Error = B::Error;

    fn write_command(&mut self, opcode: u8, params: &[u8]) -> Result<(), Self::Error> {
        (**self).write_command(opcode, params)
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_pixels(data)
    }
}

/// 4-wire SPI: SCK/SDA on the bus, plus D/C and an optional chip select
pub struct SpiInterface<SPI, DC, CS = NoPin> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC> SpiInterface<SPI, DC, NoPin>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    /// Interface for a panel with chip select tied low
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self::with_cs(spi, dc, NoPin)
    }
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    pub fn with_cs(spi: SPI, dc: DC, mut cs: CS) -> Self {
        cs.set_high();
        Self { spi, dc, cs }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    fn send_command(&mut self, opcode: u8, params: &[u8]) -> Result<(), SPI::Error> {
        self.dc.set_low();
        self.spi.write(&[opcode])?;
        if !params.is_empty() {
            self.dc.set_high();
            self.spi.write(params)?;
        }
        Ok(())
    }
}

impl<SPI, DC, CS> CommandBus for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = SPI::Error;

    fn write_command(&mut self, opcode: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low();
        let result = self.send_command(opcode, params);
        // Release the bus even if the transfer failed
        self.cs.set_high();
        result
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low();
        self.dc.set_high();
        let result = self.spi.write(data);
        self.cs.set_high();
        result
    }
}
