use clap::ValueEnum;
use dac8571_hal::{Command, PowerDownMode};

/// Control byte used for writes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum WriteMode {
    /// 0x00: write the temporary register only
    Temp,
    /// 0x01: write the temporary register with power-down
    TempPowerDown,
    /// 0x10: write and update the output
    Update,
    /// 0x11: write, update and power down
    UpdatePowerDown,
    /// 0x20: update the output from the temporary register
    UpdateFromTemp,
    /// 0x30: broadcast write of the temporary register
    BroadcastTemp,
    /// 0x31: broadcast write and update
    BroadcastUpdate,
    /// 0x33: broadcast power-down
    BroadcastPowerDown,
}

impl From<WriteMode> for Command {
    fn from(value: WriteMode) -> Command {
        match value {
            WriteMode::Temp => Command::WriteTemp,
            WriteMode::TempPowerDown => Command::WriteTempWithPowerDown,
            WriteMode::Update => Command::WriteAndUpdate,
            WriteMode::UpdatePowerDown => Command::WriteAndUpdateWithPowerDown,
            WriteMode::UpdateFromTemp => Command::UpdateFromTemp,
            WriteMode::BroadcastTemp => Command::BroadcastWriteTemp,
            WriteMode::BroadcastUpdate => Command::BroadcastWriteAndUpdate,
            WriteMode::BroadcastPowerDown => Command::BroadcastPowerDown,
        }
    }
}

/// Output state while powered down.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PowerDown {
    /// Lowest supply current
    LowPower,
    /// Fast recovery
    Fast,
    /// 1 kΩ to ground
    #[value(name = "1k")]
    Pulldown1k,
    /// 100 kΩ to ground
    #[value(name = "100k")]
    Pulldown100k,
    /// High impedance
    HiZ,
}

impl From<PowerDown> for PowerDownMode {
    fn from(value: PowerDown) -> PowerDownMode {
        match value {
            PowerDown::LowPower => PowerDownMode::LowPower,
            PowerDown::Fast => PowerDownMode::FastRecovery,
            PowerDown::Pulldown1k => PowerDownMode::Pulldown1k,
            PowerDown::Pulldown100k => PowerDownMode::Pulldown100k,
            PowerDown::HiZ => PowerDownMode::HighImpedance,
        }
    }
}
