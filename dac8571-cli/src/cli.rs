use crate::modes::{PowerDown, WriteMode};
use crate::util;

use clap::Parser;
use dac8571_hal::Config;

/// CLI for the DAC8571 16-bit I2C digital-to-analog converter
///
/// Talks to a single DAC8571 through a Linux I2C bus device (/dev/i2c-N).
/// Every command first probes the device, then performs its operation.
///
/// Raw codes are given in hexadecimal (0x0000 to 0xFFFF). Voltages are scaled
/// against the reference voltage and rounded down to the nearest code.
///
/// Each invocation starts with the "write and update" control byte, so a
/// power-down lasts until the next command that writes with an updating mode.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// I2C bus number
    #[arg(short, long, default_value_t = 1)]
    pub(crate) bus: u8,
    /// Device address in hexadecimal (0x4C or 0x4E)
    #[arg(short, long, default_value = "0x4C", value_parser = util::u8_from_hex)]
    pub(crate) address: u8,
    /// Reference voltage in volts
    #[arg(short = 'r', long = "vref", default_value_t = Config::DEFAULT_REFERENCE_VOLTAGE)]
    pub(crate) vref: f32,
    /// Presence probes to make before giving up
    #[arg(long, default_value_t = 5)]
    pub(crate) probe_attempts: u32,
    /// Log every bus operation
    #[arg(short, long)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// Check the DAC8571 acknowledges its address.
    Probe,
    /// Write a raw code.
    Write {
        /// Code in hexadecimal
        #[arg(value_parser = util::u16_from_hex)]
        value: u16,
        /// Control byte to write with
        #[arg(short, long, default_value = "update")]
        mode: WriteMode,
    },
    /// Write up to 14 raw codes in sequence.
    WriteArray {
        /// Codes in hexadecimal
        #[arg(required = true, num_args = 1.., value_parser = util::u16_from_hex)]
        values: Vec<u16>,
        /// Control byte to write with
        #[arg(short, long, default_value = "update")]
        mode: WriteMode,
    },
    /// Read the data register.
    Read,
    /// Set the output voltage.
    Voltage {
        /// Output voltage, from 0 to the reference voltage
        #[arg(allow_negative_numbers = true)]
        volts: f32,
    },
    /// Power down the output stage.
    PowerDown {
        /// Output state while powered down
        mode: PowerDown,
    },
    /// Restore an output code after power-down.
    Wake {
        /// Code in hexadecimal
        #[arg(value_parser = util::u16_from_hex)]
        value: u16,
        /// Control byte to write with
        #[arg(short, long, default_value = "update")]
        mode: WriteMode,
    },
    /// Write zero to the output.
    Reset,
    /// Exercise every driver operation and report the results.
    ///
    /// This changes the output several times and leaves it at 0 V.
    SelfTest,
}
