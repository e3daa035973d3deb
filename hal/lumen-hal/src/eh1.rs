//! Adapters from embedded-hal 1.0
//!
//! Chip HALs implement the embedded-hal traits; these newtypes let their
//! peripherals drive the display core without extra glue in the firmware.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;
use embedded_hal::spi::SpiDevice;

use crate::{DelayMs, OutputPin, SpiBus};

/// Output pin backed by an infallible embedded-hal pin
pub struct Eh1Pin<P>(pub P);

impl<P> OutputPin for Eh1Pin<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

/// SPI bus backed by an embedded-hal `SpiDevice`
///
/// The device owns chip select, so pair it with [`crate::NoPin`] for CS.
pub struct Eh1Spi<S>(pub S);

impl<S: SpiDevice> SpiBus for Eh1Spi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)
    }
}

/// Millisecond delay backed by an embedded-hal `DelayNs`
pub struct Eh1Delay<D>(pub D);

impl<D: DelayNs> DelayMs for Eh1Delay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}
