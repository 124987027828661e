//! On-hardware exercise of every driver operation with valid and invalid input.
use std::fmt;

use dac8571_hal::{Command, Dac8571, PowerDownMode, Transport};

const VOLTAGES: [f32; 5] = [-2.0, 0.0, 1.25, 2.0, 3.3];
const WRITE_MODES: [u8; 9] = [0x00, 0x01, 0x10, 0x11, 0x20, 0x30, 0x31, 0x33, 0xFF];
const POWER_MODES: [u8; 6] = [0, 1, 2, 3, 4, 0xFF];
const TEST_ARRAY: [u16; 3] = [0x0000, 0x8000, 0xFFFF];
const OVERSIZED_ARRAY: [u16; 20] = [0x8000; 20];

#[derive(Debug, Default)]
pub(crate) struct Report {
    pub(crate) passed: u32,
    pub(crate) failed: u32,
}

impl Report {
    fn check(&mut self, name: impl fmt::Display, passed: bool) {
        if passed {
            self.passed += 1;
            println!("[PASSED] {name}");
        } else {
            self.failed += 1;
            println!("[FAILED] {name}");
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===================================")?;
        writeln!(f, "DAC8571 SELF-TEST COMPLETED")?;
        writeln!(
            f,
            "Total: {} | Passed: {} | Failed: {}",
            self.passed + self.failed,
            self.passed,
            self.failed
        )?;
        write!(f, "===================================")
    }
}

fn section(title: &str) {
    println!("\n{title}\n-----------------------------------");
}

/// Run every check against the device, then return the output to 0 V.
///
/// Checks on invalid input pass when the driver rejects it. Note that the
/// power-down checks leave the power-down control byte selected, so the later
/// writes keep the output powered down.
pub(crate) fn run<T: Transport>(dac: &mut Dac8571<T>) -> Report {
    let mut report = Report::default();
    println!("===================================");
    println!("        DAC8571 SELF-TEST");
    println!("===================================");

    section("[1] Voltage Write Tests");
    let vref = dac.config().reference_voltage;
    for volts in VOLTAGES {
        let in_range = (0.0..=vref).contains(&volts);
        let outcome = dac.set_voltage(volts);
        report.check(format_args!("SetVoltage({volts:.2}V)"), outcome.is_ok() == in_range);
    }

    section("[2] Write Mode Tests");
    for raw in WRITE_MODES {
        let expected_valid = raw != 0xFF;
        let accepted = match Command::try_from(raw) {
            Ok(mode) => {
                dac.set_write_mode(mode);
                dac.write_mode() == mode
            }
            Err(_) => false,
        };
        report.check(format_args!("SetWriteMode({raw:#04X})"), accepted == expected_valid);
    }

    section("[3] Power Mode Tests");
    for raw in POWER_MODES {
        let expected_valid = raw <= 4;
        let accepted = match PowerDownMode::try_from(raw) {
            Ok(mode) => dac.power_down(mode).is_ok(),
            Err(_) => false,
        };
        report.check(format_args!("PowerMode({raw:#04X})"), accepted == expected_valid);
    }

    section("[4] Array Write Test");
    report.check("WriteArray(valid)", dac.write_all(&TEST_ARRAY).is_ok());
    report.check("WriteArray(overflow)", dac.write_all(&OVERSIZED_ARRAY).is_err());

    section("[5] Read / Write / Reset Tests");
    report.check("Write(0x8000)", dac.write(0x8000).is_ok());
    match dac.read() {
        Ok(value) => println!("Read Value: {value:#06X}"),
        Err(e) => println!("Read failed: {e}"),
    }
    report.check("Reset", dac.reset().is_ok());

    section("[6] Wake-Up Test");
    report.check("WakeUp", dac.wake_up(0x8000).is_ok());

    section("[7] Get Functions");
    println!("GetAddress: {:#04X}", dac.address().seven_bit());
    println!("GetWriteMode: {:#04X}", dac.write_mode().byte());
    println!("GetLastError: {:#04X}", u8::from(dac.take_last_error()));
    println!();

    if let Err(e) = dac.set_voltage(0.0) {
        log::warn!("could not return output to 0 V: {e}");
    }
    report
}

#[cfg(test)]
mod test {
    use super::*;
    use dac8571_hal::{Address, Timeout};

    /// Transport where every transfer is acknowledged (or none are).
    struct FixedTransport {
        acknowledge: bool,
        writes: usize,
    }

    impl Transport for FixedTransport {
        type Error = &'static str;

        fn write(&mut self, _: u8, _: &[u8], _: Timeout) -> Result<(), Self::Error> {
            self.writes += 1;
            self.acknowledge.then_some(()).ok_or("nack")
        }

        fn read(&mut self, _: u8, buffer: &mut [u8], _: Timeout) -> Result<(), Self::Error> {
            buffer.fill(0);
            self.acknowledge.then_some(()).ok_or("nack")
        }

        fn probe(&mut self, _: u8, _: u32, _: Timeout) -> Result<(), Self::Error> {
            self.acknowledge.then_some(()).ok_or("nack")
        }

        fn delay_ms(&mut self, _: u32) {}
    }

    #[test]
    fn every_check_passes_on_a_responsive_device() {
        let mut transport = FixedTransport {
            acknowledge: true,
            writes: 0,
        };
        let mut dac = Dac8571::new(&mut transport, Address::Low);
        let report = run(&mut dac);
        assert_eq!(report.passed, 25);
        assert_eq!(report.failed, 0);
        assert_eq!(dac.last_value(), 0);
        drop(dac);
        // 3 voltages, 5 power modes, 3 array values, write, reset, wake, final 0 V.
        assert_eq!(transport.writes, 15);
    }

    #[test]
    fn only_bus_checks_fail_on_a_silent_device() {
        let mut transport = FixedTransport {
            acknowledge: false,
            writes: 0,
        };
        let mut dac = Dac8571::new(&mut transport, Address::Low);
        let report = run(&mut dac);
        assert_eq!(report.passed, 13);
        assert_eq!(report.failed, 12);
    }
}
