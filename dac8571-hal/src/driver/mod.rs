use log::{debug, info, warn};

use crate::commands::{Command, read_value, write_frame};
use crate::error::{Error, ErrorCode};
use crate::{Address, Config, Timeout, Transport};

mod analog;

/// Most values a single [`Dac8571::write_all`] call will write.
pub const MAX_WRITE_ARRAY_LEN: usize = 14;

/// Driver for the DAC8571.
///
/// # Quick start
///
/// Create the driver with [`Dac8571::new`] (or [`Dac8571::with_config`] to change
/// the reference voltage or probe timings), then call [`Dac8571::init`] to check
/// the device is on the bus.
///
/// Set the output with [`Dac8571::set_voltage`] or, for a raw code,
/// [`Dac8571::write`]. Power the output stage down with [`Dac8571::power_down`].
///
/// # State
///
/// The driver remembers the last value it wrote successfully, the control byte
/// used for writes, and the last error. It never reads these back from the
/// device, so they can go stale if the DAC8571 is reset by other means.
///
/// Every bus operation returns its error to the caller and also latches an
/// [`ErrorCode`], which is read and cleared by [`Dac8571::take_last_error`].
///
/// # Transport ownership
///
/// The driver takes any [`Transport`]. Pass `&mut transport` to keep ownership
/// of the bus, or an owned transport and get it back with [`Dac8571::release`].
#[derive(Debug)]
pub struct Dac8571<T> {
    transport: T,
    address: Address,
    last_value: u16,
    write_mode: Command,
    last_error: ErrorCode,
    config: Config,
}

impl<T: Transport> Dac8571<T> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Bind a driver to the transport and address with the default [`Config`].
    ///
    /// No bus traffic occurs. Call [`Dac8571::init`] to probe for the device.
    pub fn new(transport: T, address: Address) -> Self {
        Self::with_config(transport, address, Config::default())
    }

    /// Bind a driver to the transport and address with the given [`Config`].
    pub fn with_config(transport: T, address: Address, config: Config) -> Self {
        Self {
            transport,
            address,
            last_value: 0,
            write_mode: Command::default(),
            last_error: ErrorCode::Ok,
            config,
        }
    }

    /// Consume the driver and give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Check the DAC8571 is responding.
    ///
    /// Clears a stale busy condition on the transport, then probes the device
    /// up to [`Config::probe_attempts`] times, pausing [`Config::probe_delay_ms`]
    /// after each failure.
    ///
    /// Returns the (1-based) attempt on which the device answered.
    ///
    /// # Errors
    ///
    /// [`Error::NotConnected`] if no probe was acknowledged. The latched error is
    /// left as [`ErrorCode::I2c`].
    pub fn init(&mut self) -> Result<u32, Error<T::Error>> {
        if self.transport.is_busy() {
            debug!("DAC8571: clearing stale bus busy condition");
            self.transport.clear_busy();
        }

        let attempts = self.config.probe_attempts;
        for attempt in 1..=attempts {
            if self.is_connected().is_ok() {
                debug!("DAC8571 connection attempt {attempt}: OK");
                info!("DAC8571 at {:#04X} ready", self.address.seven_bit());
                return Ok(attempt);
            }
            debug!("DAC8571 connection attempt {attempt}: FAIL");
            self.transport.delay_ms(self.config.probe_delay_ms);
        }

        warn!("DAC8571 not responding after {attempts} attempts");
        Err(Error::NotConnected { attempts })
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Bus operations
    ////////////////////////////////////////////////////////////////////////////////

    /// Write a 16-bit value using the current control byte.
    ///
    /// Sends `[control, value_hi, value_lo]`. What the device does with the
    /// value depends on [`Dac8571::write_mode`].
    ///
    /// # Errors
    ///
    /// [`Error::I2c`] if the transfer fails, in which case
    /// [`Dac8571::last_value`] is unchanged.
    pub fn write(&mut self, value: u16) -> Result<(), Error<T::Error>> {
        let frame = write_frame(self.write_mode, value);
        let timeout = Timeout::Millis(self.config.write_timeout_ms);
        match self.transport.write(self.address.seven_bit(), &frame, timeout) {
            Ok(()) => {
                self.last_value = value;
                self.last_error = ErrorCode::Ok;
                Ok(())
            }
            Err(e) => {
                self.last_error = ErrorCode::I2c;
                warn!(
                    "DAC8571: failed to write {value:#06X} to {:#04X}: {e:?}",
                    self.address.seven_bit()
                );
                Err(Error::I2c(e))
            }
        }
    }

    /// Write each value in turn, stopping at the first failure.
    ///
    /// Values before a failure have already reached the device.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyBuffer`] if `values` is empty (nothing latched).
    /// - [`Error::BufferTooLong`] if there are more than [`MAX_WRITE_ARRAY_LEN`]
    ///   values. [`ErrorCode::Buffer`] is latched and nothing is written.
    /// - [`Error::I2c`] from the first failed write.
    pub fn write_all(&mut self, values: &[u16]) -> Result<(), Error<T::Error>> {
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
        values.iter().try_for_each(|&value| self.write(value))
    }

    /// Read the data word back from the device.
    ///
    /// The device returns three bytes: the data word, most significant byte
    /// first, then the last control byte, which is discarded.
    ///
    /// # Errors
    ///
    /// [`Error::I2c`] if the transfer fails.
    pub fn read(&mut self) -> Result<u16, Error<T::Error>> {
        let mut buffer = [0u8; 3];
        match self
            .transport
            .read(self.address.seven_bit(), &mut buffer, Timeout::Max)
        {
            Ok(()) => {
                self.last_error = ErrorCode::Ok;
                Ok(read_value(&buffer))
            }
            Err(e) => {
                self.last_error = ErrorCode::I2c;
                warn!(
                    "DAC8571: read from {:#04X} failed: {e:?}",
                    self.address.seven_bit()
                );
                Err(Error::I2c(e))
            }
        }
    }

    /// Check the device acknowledges its address.
    ///
    /// A successful probe leaves the latched error as it was.
    ///
    /// # Errors
    ///
    /// [`Error::I2c`] if the device does not acknowledge.
    pub fn is_connected(&mut self) -> Result<(), Error<T::Error>> {
        let timeout = Timeout::Millis(self.config.probe_timeout_ms);
        self.transport
            .probe(self.address.seven_bit(), self.config.probe_trials, timeout)
            .map_err(|e| {
                self.last_error = ErrorCode::I2c;
                debug!(
                    "DAC8571 not responding at {:#04X}: {e:?}",
                    self.address.seven_bit()
                );
                Error::I2c(e)
            })
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Driver state
    ////////////////////////////////////////////////////////////////////////////////

    /// Select the control byte used by subsequent writes.
    ///
    /// To select a mode from a raw byte, convert it first with
    /// [`Command::try_from`], which rejects anything but the eight control bytes.
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
