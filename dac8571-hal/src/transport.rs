//! The bus primitive the driver talks through.
//!
//! [`Transport`] describes the blocking I2C master the driver needs. Most
//! users will wrap an [`embedded_hal::i2c::I2c`] bus and a
//! [`embedded_hal::delay::DelayNs`] provider in [`BusTransport`].
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::Timeout;

/// Blocking I2C master used by [`Dac8571`].
///
/// Addresses are always 7-bit; the transport adds the read/write bit.
///
/// [`Dac8571`]: crate::Dac8571
pub trait Transport {
    /// Transport failure type.
    type Error: core::fmt::Debug;

    /// Write `bytes` to the target in a single transfer with START and STOP.
    fn write(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        timeout: Timeout,
    ) -> Result<(), Self::Error>;

    /// Fill `buffer` from the target in a single transfer with START and STOP.
    fn read(
        &mut self,
        address: SevenBitAddress,
        buffer: &mut [u8],
        timeout: Timeout,
    ) -> Result<(), Self::Error>;

    /// Check that the target acknowledges its address, trying up to `trials` times.
    fn probe(
        &mut self,
        address: SevenBitAddress,
        trials: u32,
        timeout: Timeout,
    ) -> Result<(), Self::Error>;

    /// Block for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// True if the bus peripheral is stuck reporting a transfer in progress.
    fn is_busy(&mut self) -> bool {
        false
    }

    /// Clear a stale busy condition.
    fn clear_busy(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        timeout: Timeout,
    ) -> Result<(), Self::Error> {
        T::write(self, address, bytes, timeout)
    }

    fn read(
        &mut self,
        address: SevenBitAddress,
        buffer: &mut [u8],
        timeout: Timeout,
    ) -> Result<(), Self::Error> {
        T::read(self, address, buffer, timeout)
    }

    fn probe(
        &mut self,
        address: SevenBitAddress,
        trials: u32,
        timeout: Timeout,
    ) -> Result<(), Self::Error> {
        T::probe(self, address, trials, timeout)
    }

    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }

    fn is_busy(&mut self) -> bool {
        T::is_busy(self)
    }

    fn clear_busy(&mut self) {
        T::clear_busy(self)
    }
}

/// [`Transport`] over any `embedded-hal` I2C bus and delay provider.
///
/// `embedded-hal` buses own their own timeouts, so the timeouts requested by
/// the driver are not applied here. The bus never reports itself busy.
///
/// A presence probe is a zero-length write: START, address with the write bit,
/// STOP. Some buses (the MCP2221, for one) refuse zero-length transfers, in
/// which case the probe fails even if the DAC8571 is present.
#[derive(Debug)]
pub struct BusTransport<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> BusTransport<I2C, D> {
    /// Wrap an I2C bus and a delay provider.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Give back the bus and the delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for BusTransport<I2C, D>
where
    I2C: I2c<SevenBitAddress>,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        _timeout: Timeout,
    ) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    fn read(
        &mut self,
        address: SevenBitAddress,
        buffer: &mut [u8],
        _timeout: Timeout,
    ) -> Result<(), Self::Error> {
        self.i2c.read(address, buffer)
    }

    fn probe(
        &mut self,
        address: SevenBitAddress,
        trials: u32,
        _timeout: Timeout,
    ) -> Result<(), Self::Error> {
        let mut outcome = self.i2c.write(address, &[]);
        for _ in 1..trials {
            if outcome.is_ok() {
                break;
            }
            outcome = self.i2c.write(address, &[]);
        }
        outcome
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}
