use core::fmt;

/// Wrapper for problems when communicating with the DAC8571.
///
/// `E` is the error type of the underlying [`Transport`].
///
/// [`Transport`]: crate::Transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport reported a failure (no acknowledge, bus error, timeout).
    ///
    /// The driver latches [`ErrorCode::I2c`] when this occurs.
    I2c(E),
    /// The device did not acknowledge its address during [`Dac8571::init`].
    ///
    /// [`Dac8571::init`]: crate::Dac8571::init
    NotConnected {
        /// Number of presence probes made before giving up.
        attempts: u32,
    },
    /// The address is not one of the two the DAC8571 can be strapped to.
    InvalidAddress(u8),
    /// The byte is not one of the eight DAC8571 control bytes.
    InvalidCommand(u8),
    /// The byte does not select one of the five power-down modes.
    InvalidPowerDownMode(u8),
    /// The requested voltage is negative, above the reference voltage, or NaN.
    VoltageOutOfRange,
    /// No values were given to write.
    EmptyBuffer,
    /// More values were given than a single call may write.
    ///
    /// The driver latches [`ErrorCode::Buffer`] when this occurs.
    BufferTooLong {
        /// Number of values that were given.
        len: usize,
    },
}

impl<E> Error<E> {
    /// The wire-level error code for this error, if it has one.
    ///
    /// Argument errors that are caught before any bus traffic (bad voltage,
    /// empty buffer, unknown command) have no code and are never latched.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::I2c(_) | Error::NotConnected { .. } => Some(ErrorCode::I2c),
            Error::InvalidAddress(_) => Some(ErrorCode::Address),
            Error::BufferTooLong { .. } => Some(ErrorCode::Buffer),
            Error::InvalidCommand(_)
            | Error::InvalidPowerDownMode(_)
            | Error::VoltageOutOfRange
            | Error::EmptyBuffer => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C transfer failed: {e:?}"),
            Error::NotConnected { attempts } => {
                write!(f, "DAC8571 not responding after {attempts} attempts")
            }
            Error::InvalidAddress(address) => {
                write!(f, "invalid DAC8571 address {address:#04X}")
            }
            Error::InvalidCommand(byte) => write!(f, "invalid control byte {byte:#04X}"),
            Error::InvalidPowerDownMode(byte) => {
                write!(f, "invalid power-down mode selector {byte:#04X}")
            }
            Error::VoltageOutOfRange => write!(f, "voltage outside of the reference range"),
            Error::EmptyBuffer => write!(f, "no values to write"),
            Error::BufferTooLong { len } => write!(
                f,
                "{len} values given, at most {} may be written at once",
                crate::MAX_WRITE_ARRAY_LEN
            ),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

#[doc(hidden)]
impl<E> From<InvalidSetting> for Error<E> {
    fn from(value: InvalidSetting) -> Self {
        match value {
            InvalidSetting::Address(byte) => Error::InvalidAddress(byte),
            InvalidSetting::Command(byte) => Error::InvalidCommand(byte),
            InvalidSetting::PowerDownMode(byte) => Error::InvalidPowerDownMode(byte),
        }
    }
}

/// A raw byte that does not name a valid DAC8571 setting.
///
/// Returned by the `TryFrom<u8>` conversions of [`Address`], [`Command`] and
/// [`PowerDownMode`]. It converts into [`Error`] so `?` works in functions
/// returning driver errors.
///
/// [`Address`]: crate::Address
/// [`Command`]: crate::Command
/// [`PowerDownMode`]: crate::PowerDownMode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidSetting {
    /// Not `0x4C` or `0x4E`.
    Address(u8),
    /// Not one of the eight control bytes.
    Command(u8),
    /// Not a power-down selector in `0..=4`.
    PowerDownMode(u8),
}

impl fmt::Display for InvalidSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Error::<core::convert::Infallible>::from(*self), f)
    }
}

impl core::error::Error for InvalidSetting {}

/// Error code latched by the driver after each operation.
///
/// The numeric values are those used by the reference firmware for this part,
/// so they can be reported over a host link unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    /// No error.
    #[default]
    Ok = 0x00,
    /// I2C communication failed.
    I2c = 0x81,
    /// Invalid device address.
    Address = 0x82,
    /// Too many values for one array write.
    Buffer = 0x83,
}

impl From<ErrorCode> for u8 {
    fn from(value: ErrorCode) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ErrorCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Ok),
            0x81 => Ok(Self::I2c),
            0x82 => Ok(Self::Address),
            0x83 => Ok(Self::Buffer),
            other => Err(other),
        }
    }
}
