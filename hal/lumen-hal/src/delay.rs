//! Blocking delays
//!
//! Reset and init timing on display controllers is specified in whole
//! milliseconds, so that is the only resolution exposed here.

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<D: DelayMs> DelayMs for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
