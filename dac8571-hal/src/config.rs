/// Driver constants that may be tuned for a particular board.
///
/// The defaults suit a DAC8571 with a 2.5 V reference on a standard-mode bus.
///
/// ```
/// use dac8571_hal::Config;
///
/// let config = Config::default()
///     .with_reference_voltage(4.096)
///     .with_probe_attempts(10);
/// assert_eq!(config.probe_delay_ms, 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Voltage produced by the full-scale code `0xFFFF`, in volts.
    pub reference_voltage: f32,
    /// Presence probes made by [`Dac8571::init`] before giving up.
    ///
    /// [`Dac8571::init`]: crate::Dac8571::init
    pub probe_attempts: u32,
    /// Pause after each failed presence probe during init, in milliseconds.
    pub probe_delay_ms: u32,
    /// Trials the transport makes within a single presence probe.
    pub probe_trials: u32,
    /// Timeout for a single presence probe, in milliseconds.
    pub probe_timeout_ms: u32,
    /// Timeout for a single write frame, in milliseconds.
    pub write_timeout_ms: u32,
}

impl Config {
    /// Default reference voltage (2.5 V).
    pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 2.5;

    /// Set the reference voltage used by `set_voltage`.
    pub const fn with_reference_voltage(mut self, volts: f32) -> Self {
        self.reference_voltage = volts;
        self
    }

    /// Set the number of presence probes made during init.
    pub const fn with_probe_attempts(mut self, attempts: u32) -> Self {
        self.probe_attempts = attempts;
        self
    }

    /// Set the pause after a failed presence probe during init.
    pub const fn with_probe_delay_ms(mut self, ms: u32) -> Self {
        self.probe_delay_ms = ms;
        self
    }

    /// Set the timeout for writes.
    pub const fn with_write_timeout_ms(mut self, ms: u32) -> Self {
        self.write_timeout_ms = ms;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_voltage: Self::DEFAULT_REFERENCE_VOLTAGE,
            probe_attempts: 5,
            probe_delay_ms: 25,
            probe_trials: 1,
            probe_timeout_ms: 10,
            write_timeout_ms: 100,
        }
    }
}
