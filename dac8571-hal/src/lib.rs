#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod analog;
#[cfg(feature = "async")]
pub mod asynch;
pub mod commands;
pub mod common;
mod config;
mod driver;
mod error;
pub mod transport;

pub use commands::{Command, PowerDownMode};
pub use common::{Address, Timeout};
pub use config::Config;
pub use driver::{Dac8571, MAX_WRITE_ARRAY_LEN};
pub use error::{Error, ErrorCode, InvalidSetting};
pub use transport::{BusTransport, Transport};
