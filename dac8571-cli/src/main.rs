use anyhow::Context;
use clap::Parser;
use dac8571_hal::analog::code_to_voltage;
use dac8571_hal::{Address, BusTransport, Config, Dac8571};
use log::LevelFilter;
use rppal::hal::Delay;
use rppal::i2c::I2c;

use cli::Commands;

mod cli;
mod modes;
mod selftest;
mod util;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let address = Address::try_from(cli.address)?;
    let i2c = I2c::with_bus(cli.bus).with_context(|| format!("opening /dev/i2c-{}", cli.bus))?;
    let config = Config::default()
        .with_reference_voltage(cli.vref)
        .with_probe_attempts(cli.probe_attempts);
    let mut dac = Dac8571::with_config(BusTransport::new(i2c, Delay::new()), address, config);

    let attempt = dac.init()?;
    match cli.command {
        Commands::Probe => println!(
            "DAC8571 at {:#04X} answered on attempt {attempt}",
            address.seven_bit()
        ),
        Commands::Write { value, mode } => {
            dac.set_write_mode(mode.into());
            dac.write(value)?;
        }
        Commands::WriteArray { values, mode } => {
            dac.set_write_mode(mode.into());
            dac.write_all(&values)?;
        }
        Commands::Read => {
            let code = dac.read()?;
            println!("{code:#06X} ({:.4} V)", code_to_voltage(code, cli.vref));
        }
        Commands::Voltage { volts } => {
            dac.set_voltage(volts)?;
            println!("{:#06X}", dac.last_value());
        }
        Commands::PowerDown { mode } => dac.power_down(mode.into())?,
        Commands::Wake { value, mode } => {
            dac.set_write_mode(mode.into());
            dac.wake_up(value)?;
        }
        Commands::Reset => dac.reset()?,
        Commands::SelfTest => {
            let report = selftest::run(&mut dac);
            println!("{report}");
            if report.failed > 0 {
                anyhow::bail!("{} self-test checks failed", report.failed);
            }
        }
    }
    Ok(())
}
