use log::{debug, warn};

use super::Dac8571;
use crate::analog::voltage_to_code;
use crate::{Command, Error, PowerDownMode, Transport};

/// Output voltage and power-down control.
impl<T: Transport> Dac8571<T> {
    /// Set the output to a voltage between 0 and the reference voltage.
    ///
    /// The code written is `floor(volts / reference * 65535)`, so the output may
    /// sit up to one LSB below the requested voltage. The current write mode is
    /// used, so the output only changes if that mode updates it.
    ///
    /// # Errors
    ///
    /// [`Error::VoltageOutOfRange`] if `volts` is negative, above
    /// [`Config::reference_voltage`], or NaN. Nothing is sent on the bus.
    ///
    /// [`Config::reference_voltage`]: crate::Config::reference_voltage
    pub fn set_voltage(&mut self, volts: f32) -> Result<(), Error<T::Error>> {
        let Some(code) = voltage_to_code(volts, self.config.reference_voltage) else {
            warn!(
                "DAC8571: {volts} V outside of 0..={} V",
                self.config.reference_voltage
            );
            return Err(Error::VoltageOutOfRange);
        };
        self.write(code)
    }

    /// Power down the output stage.
    ///
    /// This switches the write mode to [`Command::WriteTempWithPowerDown`],
    /// whatever it was before, and writes the mode into bits 15 to 13 of the data
    /// word. The new write mode stays selected afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::I2c`] if the transfer fails. The write mode has already been
    /// changed in that case.
    pub fn power_down(&mut self, mode: PowerDownMode) -> Result<(), Error<T::Error>> {
        self.write_mode = Command::WriteTempWithPowerDown;
        self.write(mode.data_word())
    }

    /// Restore an output value after power-down.
    ///
    /// This is a plain [`Dac8571::write`] with the current write mode. After
    /// [`Dac8571::power_down`] that is still the power-down control byte, so select
    /// an updating mode with [`Dac8571::set_write_mode`] first to bring the output
    /// back.
    pub fn wake_up(&mut self, value: u16) -> Result<(), Error<T::Error>> {
        if self.write_mode.is_power_down() {
            debug!(
                "DAC8571: wake_up with power-down control byte {:#04X} selected",
                self.write_mode.byte()
            );
        }
        self.write(value)
    }

    /// Write zero with the current write mode.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.write(0)
    }
}
