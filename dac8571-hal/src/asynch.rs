//! Async driver over `embedded-hal-async`.
//!
//! [`Dac8571`] mirrors the blocking [`crate::Dac8571`] operation for operation,
//! with the same latched error and write-mode behaviour. It talks to the bus
//! through [`embedded_hal_async::i2c::I2c`] and pauses between init probes with
//! [`embedded_hal_async::delay::DelayNs`]. Timeouts are left to the bus.
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::{debug, info, warn};

use crate::analog::voltage_to_code;
use crate::commands::{read_value, write_frame};
use crate::{
    Address, Command, Config, Error, ErrorCode, MAX_WRITE_ARRAY_LEN, PowerDownMode,
};

/// Async driver for the DAC8571.
#[derive(Debug)]
pub struct Dac8571<I2C, D> {
    i2c: I2C,
    delay: D,
    address: Address,
    last_value: u16,
    write_mode: Command,
    last_error: ErrorCode,
    config: Config,
}

impl<I2C, D> Dac8571<I2C, D>
where
    I2C: I2c<SevenBitAddress>,
    D: DelayNs,
{
    /// Bind a driver to the bus and address with the default [`Config`].
    pub fn new(i2c: I2C, delay: D, address: Address) -> Self {
        Self::with_config(i2c, delay, address, Config::default())
    }

    /// Bind a driver to the bus and address with the given [`Config`].
    pub fn with_config(i2c: I2C, delay: D, address: Address, config: Config) -> Self {
        Self {
            i2c,
            delay,
            address,
            last_value: 0,
            write_mode: Command::default(),
            last_error: ErrorCode::Ok,
            config,
        }
    }

    /// Consume the driver and give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Probe for the device. See [`crate::Dac8571::init`].
    pub async fn init(&mut self) -> Result<u32, Error<I2C::Error>> {
        let attempts = self.config.probe_attempts;
        for attempt in 1..=attempts {
            if self.is_connected().await.is_ok() {
                debug!("DAC8571 connection attempt {attempt}: OK");
                info!("DAC8571 at {:#04X} ready", self.address.seven_bit());
                return Ok(attempt);
            }
            debug!("DAC8571 connection attempt {attempt}: FAIL");
            self.delay.delay_ms(self.config.probe_delay_ms).await;
        }

        warn!("DAC8571 not responding after {attempts} attempts");
        Err(Error::NotConnected { attempts })
    }

    /// Write a 16-bit value using the current control byte.
    pub async fn write(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        let frame = write_frame(self.write_mode, value);
        match self.i2c.write(self.address.seven_bit(), &frame).await {
            Ok(()) => {
                self.last_value = value;
                self.last_error = ErrorCode::Ok;
                Ok(())
            }
            Err(e) => {
                self.last_error = ErrorCode::I2c;
                warn!("DAC8571: failed to write {value:#06X}: {e:?}");
                Err(Error::I2c(e))
            }
        }
    }

    /// Write each value in turn, stopping at the first failure.
    pub async fn write_all(&mut self, values: &[u16]) -> Result<(), Error<I2C::Error>> {
        if values.is_empty() {
            warn!("DAC8571: no values given to write_all");
            return Err(Error::EmptyBuffer);
        }
        if values.len() > MAX_WRITE_ARRAY_LEN {
            self.last_error = ErrorCode::Buffer;
            warn!(
                "DAC8571: {} values given to write_all, limit is {MAX_WRITE_ARRAY_LEN}",
                values.len()
            );
            return Err(Error::BufferTooLong { len: values.len() });
        }
        for &value in values {
            self.write(value).await?;
        }
        Ok(())
    }

    /// Read the data word back from the device.
    pub async fn read(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut buffer = [0u8; 3];
        match self.i2c.read(self.address.seven_bit(), &mut buffer).await {
            Ok(()) => {
                self.last_error = ErrorCode::Ok;
                Ok(read_value(&buffer))
            }
            Err(e) => {
                self.last_error = ErrorCode::I2c;
                warn!("DAC8571: read failed: {e:?}");
                Err(Error::I2c(e))
            }
        }
    }

    /// Check the device acknowledges its address with a zero-length write.
    pub async fn is_connected(&mut self) -> Result<(), Error<I2C::Error>> {
        let address = self.address.seven_bit();
        let mut outcome = self.i2c.write(address, &[]).await;
        for _ in 1..self.config.probe_trials {
            if outcome.is_ok() {
                break;
            }
            outcome = self.i2c.write(address, &[]).await;
        }
        outcome.map_err(|e| {
            self.last_error = ErrorCode::I2c;
            debug!("DAC8571 not responding at {address:#04X}: {e:?}");
            Error::I2c(e)
        })
    }

    /// Set the output to a voltage between 0 and the reference voltage.
    pub async fn set_voltage(&mut self, volts: f32) -> Result<(), Error<I2C::Error>> {
        let Some(code) = voltage_to_code(volts, self.config.reference_voltage) else {
            warn!(
                "DAC8571: {volts} V outside of 0..={} V",
                self.config.reference_voltage
            );
            return Err(Error::VoltageOutOfRange);
        };
        self.write(code).await
    }

    /// Power down the output stage, switching to the power-down write mode.
    pub async fn power_down(&mut self, mode: PowerDownMode) -> Result<(), Error<I2C::Error>> {
        self.write_mode = Command::WriteTempWithPowerDown;
        self.write(mode.data_word()).await
    }

    /// Restore an output value with the current write mode.
    pub async fn wake_up(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        if self.write_mode.is_power_down() {
            debug!(
                "DAC8571: wake_up with power-down control byte {:#04X} selected",
                self.write_mode.byte()
            );
        }
        self.write(value).await
    }

    /// Write zero with the current write mode.
    pub async fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write(0).await
    }

    /// Select the control byte used by subsequent writes.
    pub fn set_write_mode(&mut self, mode: Command) {
        debug!("DAC8571: write mode {:#04X}", mode.byte());
        self.write_mode = mode;
    }

    /// The control byte used by writes.
    pub fn write_mode(&self) -> Command {
        self.write_mode
    }

    /// The last value written successfully.
    pub fn last_value(&self) -> u16 {
        self.last_value
    }

    /// Return the latched error and reset it to [`ErrorCode::Ok`].
    pub fn take_last_error(&mut self) -> ErrorCode {
        core::mem::take(&mut self.last_error)
    }

    /// The device address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The driver configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
