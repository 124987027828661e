//! Driver use of the `Transport` contract: timeouts, busy flag and probe retries.
use std::collections::VecDeque;

use dac8571_hal::{Address, Config, Dac8571, Error, ErrorCode, Timeout, Transport};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Write {
        address: u8,
        bytes: Vec<u8>,
        timeout: Timeout,
    },
    Read {
        address: u8,
        len: usize,
        timeout: Timeout,
    },
    Probe {
        address: u8,
        trials: u32,
        timeout: Timeout,
    },
    Delay(u32),
    ClearBusy,
}

/// Transport that replays scripted probe outcomes and records every call.
#[derive(Debug, Default)]
struct ScriptedTransport {
    busy: bool,
    probe_outcomes: VecDeque<bool>,
    read_data: [u8; 3],
    calls: Vec<Call>,
}

impl Transport for ScriptedTransport {
    type Error = &'static str;

    fn write(&mut self, address: u8, bytes: &[u8], timeout: Timeout) -> Result<(), Self::Error> {
        self.calls.push(Call::Write {
            address,
            bytes: bytes.to_vec(),
            timeout,
        });
        Ok(())
    }

    fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        timeout: Timeout,
    ) -> Result<(), Self::Error> {
        self.calls.push(Call::Read {
            address,
            len: buffer.len(),
            timeout,
        });
        buffer.copy_from_slice(&self.read_data[..buffer.len()]);
        Ok(())
    }

    fn probe(&mut self, address: u8, trials: u32, timeout: Timeout) -> Result<(), Self::Error> {
        self.calls.push(Call::Probe {
            address,
            trials,
            timeout,
        });
        match self.probe_outcomes.pop_front() {
            Some(true) => Ok(()),
            _ => Err("nack"),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(Call::Delay(ms));
    }

    fn is_busy(&mut self) -> bool {
        self.busy
    }

    fn clear_busy(&mut self) {
        self.busy = false;
        self.calls.push(Call::ClearBusy);
    }
}

const PROBE: Call = Call::Probe {
    address: 0x4C,
    trials: 1,
    timeout: Timeout::Millis(10),
};

#[test]
fn init_clears_busy_then_retries_until_acknowledged() {
    let mut transport = ScriptedTransport {
        busy: true,
        probe_outcomes: [false, false, true].into(),
        ..Default::default()
    };
    let mut dac = Dac8571::new(&mut transport, Address::Low);
    assert_eq!(dac.init(), Ok(3));
    // The failed probes latched an error that the successful one leaves alone.
    assert_eq!(dac.take_last_error(), ErrorCode::I2c);
    drop(dac);

    assert!(!transport.busy);
    assert_eq!(
        transport.calls,
        [
            Call::ClearBusy,
            PROBE,
            Call::Delay(25),
            PROBE,
            Call::Delay(25),
            PROBE
        ]
    );
}

#[test]
fn init_does_not_clear_an_idle_bus() {
    let mut transport = ScriptedTransport {
        probe_outcomes: [true].into(),
        ..Default::default()
    };
    let mut dac = Dac8571::new(&mut transport, Address::Low);
    assert_eq!(dac.init(), Ok(1));
    drop(dac);
    assert_eq!(transport.calls, [PROBE]);
}

#[test]
fn init_honours_configured_probe_bounds() {
    let mut transport = ScriptedTransport::default();
    let config = Config::default()
        .with_probe_attempts(2)
        .with_probe_delay_ms(7);
    let mut dac = Dac8571::with_config(&mut transport, Address::High, config);
    assert_eq!(dac.init(), Err(Error::NotConnected { attempts: 2 }));
    drop(dac);
    let probe = Call::Probe {
        address: 0x4E,
        trials: 1,
        timeout: Timeout::Millis(10),
    };
    assert_eq!(
        transport.calls,
        [probe.clone(), Call::Delay(7), probe, Call::Delay(7)]
    );
}

#[test]
fn writes_use_short_timeout_and_reads_wait_forever() {
    let mut transport = ScriptedTransport {
        read_data: [0xAB, 0xCD, 0x10],
        ..Default::default()
    };
    let mut dac = Dac8571::new(&mut transport, Address::Low);
    assert_eq!(dac.write(0xABCD), Ok(()));
    assert_eq!(dac.read(), Ok(0xABCD));
    drop(dac);
    assert_eq!(
        transport.calls,
        [
            Call::Write {
                address: 0x4C,
                bytes: vec![0x10, 0xAB, 0xCD],
                timeout: Timeout::Millis(100),
            },
            Call::Read {
                address: 0x4C,
                len: 3,
                timeout: Timeout::Max,
            }
        ]
    );
}

#[test]
fn write_timeout_is_configurable() {
    let mut transport = ScriptedTransport::default();
    let config = Config::default().with_write_timeout_ms(5);
    let mut dac = Dac8571::with_config(&mut transport, Address::Low, config);
    assert_eq!(dac.config().write_timeout_ms, 5);
    assert_eq!(dac.reset(), Ok(()));
    drop(dac);
    assert_eq!(
        transport.calls,
        [Call::Write {
            address: 0x4C,
            bytes: vec![0x10, 0x00, 0x00],
            timeout: Timeout::Millis(5),
        }]
    );
}
