//! Software model of a DAC8571 on an I2C bus.
#![allow(dead_code)]

use dac8571_hal::{Command, PowerDownMode};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};

/// Register-level model of one DAC8571.
///
/// Writes update the temporary and output registers according to the control
/// byte; reads return the temporary register followed by the last control byte.
#[derive(Debug)]
pub struct DacModel {
    pub address: u8,
    /// Whether the model acknowledges its address.
    pub present: bool,
    /// Number of further transfers that succeed before the bus starts failing.
    pub fail_after: Option<usize>,
    pub temp: u16,
    pub output: u16,
    pub control: u8,
    pub power_down: Option<PowerDownMode>,
    /// Every non-empty write frame received, in order.
    pub frames: Vec<Vec<u8>>,
    /// Number of zero-length (probe) writes received.
    pub probes: usize,
    /// Number of reads received.
    pub reads: usize,
}

impl DacModel {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            present: true,
            fail_after: None,
            temp: 0,
            output: 0,
            control: 0,
            power_down: None,
            frames: Vec::new(),
            probes: 0,
            reads: 0,
        }
    }

    pub fn absent(address: u8) -> Self {
        Self {
            present: false,
            ..Self::new(address)
        }
    }

    fn nack(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }

    fn check_bus(&mut self, address: u8) -> Result<(), ErrorKind> {
        if !self.present || address != self.address {
            return Err(self.nack());
        }
        match self.fail_after {
            Some(0) => Err(ErrorKind::Bus),
            Some(n) => {
                self.fail_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn apply_frame(&mut self, frame: &[u8]) {
        let [control, high, low] = frame else {
            panic!("DAC8571 frames are three bytes, got {frame:02X?}");
        };
        let value = u16::from_be_bytes([*high, *low]);
        self.control = *control;
        let command = Command::try_from(*control).expect("valid control byte");
        match command {
            Command::WriteTemp | Command::BroadcastWriteTemp => self.temp = value,
            Command::WriteAndUpdate | Command::BroadcastWriteAndUpdate => {
                self.temp = value;
                self.output = value;
                self.power_down = None;
            }
            Command::UpdateFromTemp => {
                self.output = self.temp;
                self.power_down = None;
            }
            Command::WriteTempWithPowerDown
            | Command::WriteAndUpdateWithPowerDown
            | Command::BroadcastPowerDown => {
                self.temp = value;
                self.power_down = PowerDownMode::from_data_word(value);
            }
        }
    }
}

impl i2c::ErrorType for DacModel {
    type Error = ErrorKind;
}

impl i2c::I2c<SevenBitAddress> for DacModel {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.check_bus(address)?;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) if bytes.is_empty() => self.probes += 1,
                Operation::Write(bytes) => {
                    let frame: &[u8] = &**bytes;
                    self.frames.push(frame.to_vec());
                    self.apply_frame(frame);
                }
                Operation::Read(buffer) => {
                    self.reads += 1;
                    let [high, low] = self.temp.to_be_bytes();
                    for (slot, byte) in buffer.iter_mut().zip([high, low, self.control]) {
                        *slot = byte;
                    }
                }
            }
        }
        Ok(())
    }
}
