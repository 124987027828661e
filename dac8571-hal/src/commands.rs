//! Control bytes and data-word encodings of the DAC8571 write frame.
//!
//! Every write to the DAC8571 is three bytes: a control byte followed by the
//! 16-bit data word, most significant byte first. See the "Write sequence"
//! section of the datasheet.
use bit_field::BitField;

use crate::error::InvalidSetting;

/// Control byte sent as the first byte of each write.
///
/// The control byte selects whether the data word lands in the temporary
/// register only, also updates the output, or instead selects a power-down
/// mode. The broadcast variants address every DAC8571 on the bus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Write the temporary register only. The output does not change.
    WriteTemp = 0x00,
    /// Write the temporary register with a power-down data word.
    WriteTempWithPowerDown = 0x01,
    /// Write the temporary register and load it into the output (power-on default
    /// of this driver).
    #[default]
    WriteAndUpdate = 0x10,
    /// Write and update the output, then apply the power-down field of the data word.
    WriteAndUpdateWithPowerDown = 0x11,
    /// Load the output from the previously written temporary register.
    UpdateFromTemp = 0x20,
    /// Broadcast: write the temporary register of every device.
    BroadcastWriteTemp = 0x30,
    /// Broadcast: write and update every device.
    BroadcastWriteAndUpdate = 0x31,
    /// Broadcast: power down every device.
    BroadcastPowerDown = 0x33,
}

impl Command {
    /// All eight control bytes, in ascending order.
    pub const ALL: [Command; 8] = [
        Command::WriteTemp,
        Command::WriteTempWithPowerDown,
        Command::WriteAndUpdate,
        Command::WriteAndUpdateWithPowerDown,
        Command::UpdateFromTemp,
        Command::BroadcastWriteTemp,
        Command::BroadcastWriteAndUpdate,
        Command::BroadcastPowerDown,
    ];

    /// The control byte as sent on the wire.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// True if the data word of this command carries a power-down field
    /// rather than an output code.
    pub const fn is_power_down(self) -> bool {
        matches!(
            self,
            Command::WriteTempWithPowerDown
                | Command::WriteAndUpdateWithPowerDown
                | Command::BroadcastPowerDown
        )
    }
}

impl From<Command> for u8 {
    fn from(value: Command) -> Self {
        value.byte()
    }
}

impl TryFrom<u8> for Command {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Command::ALL
            .into_iter()
            .find(|command| command.byte() == value)
            .ok_or(InvalidSetting::Command(value))
    }
}

/// Output state while the DAC8571 is powered down.
///
/// The mode is written in bits 15 to 13 of the data word. Note that the two
/// resistive pull-downs are not adjacent codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerDownMode {
    /// Lowest supply current, slowest to wake. Field `000`.
    LowPower,
    /// Bias circuits stay on for fast recovery. Field `001`.
    FastRecovery,
    /// Output pulled to ground through 1 kΩ. Field `010`.
    Pulldown1k,
    /// Output pulled to ground through 100 kΩ. Field `110`.
    Pulldown100k,
    /// Output left floating. Field `111`.
    HighImpedance,
}

impl PowerDownMode {
    /// All five modes, in selector order.
    pub const ALL: [PowerDownMode; 5] = [
        PowerDownMode::LowPower,
        PowerDownMode::FastRecovery,
        PowerDownMode::Pulldown1k,
        PowerDownMode::Pulldown100k,
        PowerDownMode::HighImpedance,
    ];

    /// Bits of the data word holding the power-down field.
    const FIELD: core::ops::Range<usize> = 13..16;

    /// The 3-bit field value for this mode.
    pub const fn field(self) -> u16 {
        match self {
            PowerDownMode::LowPower => 0b000,
            PowerDownMode::FastRecovery => 0b001,
            PowerDownMode::Pulldown1k => 0b010,
            PowerDownMode::Pulldown100k => 0b110,
            PowerDownMode::HighImpedance => 0b111,
        }
    }

    /// The data word that selects this mode, with the remaining bits clear.
    pub fn data_word(self) -> u16 {
        let mut word = 0u16;
        word.set_bits(Self::FIELD, self.field());
        word
    }

    /// Recover the mode from a power-down data word.
    ///
    /// Returns `None` for the unassigned field values `011`, `100` and `101`.
    pub fn from_data_word(word: u16) -> Option<Self> {
        let field = word.get_bits(Self::FIELD);
        Self::ALL.into_iter().find(|mode| mode.field() == field)
    }
}

/// Convert a power-down selector (`0..=4`, in the order of [`PowerDownMode::ALL`]).
impl TryFrom<u8> for PowerDownMode {
    type Error = InvalidSetting;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidSetting::PowerDownMode(value))
    }
}

/// Build the three-byte write frame.
pub(crate) fn write_frame(command: Command, value: u16) -> [u8; 3] {
    let [high, low] = value.to_be_bytes();
    [command.byte(), high, low]
}

/// Extract the data word from a read.
///
/// The third byte returned by the device is the control byte of the last
/// write and is not used.
pub(crate) fn read_value(buffer: &[u8; 3]) -> u16 {
    u16::from_be_bytes([buffer[0], buffer[1]])
}
