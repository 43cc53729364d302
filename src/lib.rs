//! This is a platform-agnostic Rust driver for the TE Connectivity HTU21D(F) digital humidity and
//! temperature sensor using the [`embedded-hal`] or [`embedded-hal-async`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//! [`embedded-hal-async`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal-async
//!
//! This driver allows you to:
//! - Bring up the I²C controller from a [`BusConfig`] and probe for the sensor.
//! - Trigger and read temperature and relative humidity in no-hold mode.
//! - Validate every measurement word against the sensor's CRC-8.
//! - Read and write the user register, including measurement resolution and heater.
//! - Read the end-of-battery status.
//! - Trigger a software reset.
//! - blocking API support.
//! - async API support.
//!
//! This driver does not support the following device features:
//! - Hold-master measurements (the sensor stretches the clock until the conversion is done).
//!
//! ## Features
//!
//! - `async`: Enables async API.
//! - `blocking`: Enables blocking API.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Supported devices: HTU21D, HTU21DF
//!
//! The HTU21D(F) is a digital humidity sensor with temperature output.  Every sensor is
//! individually calibrated and tested.  Measurements are 12-bit relative humidity and 14-bit
//! temperature by default, each protected by a CRC-8 checksum.
//!
//! Datasheet:
//!   [HTU21D(F)](https://www.te.com/commerce/DocumentDelivery/DDEController?Action=showdoc&DocId=Data+Sheet%7FHPC199_6%7FA6%7Fpdf%7FEnglish%7FENG_DS_HPC199_6_A6.pdf)
//!
//! To use this driver, import this crate and an `embedded_hal` or `embedded_hal_async`
//! implementation, then instantiate the device.
//!
//! ## Blocking Example:
//!
//! ```ignore
//! use htu21d::{BusConfig, Htu21d, Pullup};
//!
//! // Platform-specific
//! let provider = /* htu21d::BusProvider instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! let config = BusConfig::default()
//!     .with_port(0)
//!     .with_pins(21, 22)
//!     .with_pullups(Pullup::Enabled, Pullup::Enabled);
//! let mut htu21d = Htu21d::init(provider, &config, delay).unwrap();
//!
//! let temperature = htu21d.read_temperature().unwrap();
//! let humidity = htu21d.read_humidity().unwrap();
//! println!("{:0.1} °C, {:0.1} %RH",
//!     temperature.centigrade(),
//!     humidity.percent());
//! ```
//!
//! ## Async Example:
//!
//! ```ignore
//! use htu21d::{Htu21dAsync, Resolution};
//!
//! // Platform-specific
//! let i2c = /* embedded_hal_async::i2c::I2c instance */;
//! let delay = /* embedded_hal_async::delay::DelayNs instance */;
//!
//! let mut htu21d = Htu21dAsync::new(i2c, delay);
//! htu21d.probe().await.unwrap();
//! htu21d.set_resolution_mode(Resolution::Rh11Temp11).await.unwrap();
//!
//! loop {
//!     let temperature = htu21d.read_temperature().await.unwrap();
//!     println!("{:0.1} °F", temperature.fahrenheit());
//!     // Platform-specific: sleep a while
//!     sleep_secs(60);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("At least one of \"async\" and \"blocking\" features must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[macro_use]
mod logging;

mod bus;
mod checksum;
#[cfg(feature = "blocking")]
mod device_impl;
#[cfg(feature = "async")]
mod device_impl_async;
mod hw_def;
#[cfg(test)]
mod mock;
mod types;

pub use crate::{bus::*, checksum::is_crc_valid, hw_def::*, types::*};

#[cfg(feature = "defmt")]
use defmt::Format;

/// HTU21D(F) device driver, blocking API
#[cfg(feature = "blocking")]
#[derive(Debug)]
pub struct Htu21d<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
    pub(crate) i2c_addr: I2cAddr,
    pub(crate) crc_policy: CrcPolicy,
}

/// HTU21D(F) device driver, async API
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct Htu21dAsync<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
    pub(crate) i2c_addr: I2cAddr,
    pub(crate) crc_policy: CrcPolicy,
}

/// Which quantity to measure
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// temperature
    Temperature,
    /// relative humidity
    Humidity,
}
impl Trigger {
    /// No-hold trigger command for this quantity
    pub const fn command(self) -> Command {
        match self {
            Trigger::Temperature => Command::TriggerTempNoHold,
            Trigger::Humidity => Command::TriggerHumidityNoHold,
        }
    }
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub enum Error<E> {
    /// The I²C controller rejected its configuration
    Config(E),
    /// The I²C controller driver could not be installed
    Install(E),
    /// Nothing acknowledged the sensor's address during the probe
    NotFound(E),
    /// A transaction was malformed
    InvalidArgument(E),
    /// A transaction failed
    Fail(E),
    /// The bus was not in a state to run a transaction
    InvalidState(E),
    /// A transaction did not complete in time
    Timeout(E),
    /// Checksum of a measurement word did not match (only with [`CrcPolicy::Reject`])
    CrcMismatch(RawWord),
    /// The device returned an all-zero measurement
    ReadFailed,
}

/// Kind of an [`Error`], without the underlying bus error
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// see [`Error::Config`]
    Config,
    /// see [`Error::Install`]
    Install,
    /// see [`Error::NotFound`]
    NotFound,
    /// see [`Error::InvalidArgument`]
    InvalidArgument,
    /// see [`Error::Fail`]
    Fail,
    /// see [`Error::InvalidState`]
    InvalidState,
    /// see [`Error::Timeout`]
    Timeout,
    /// see [`Error::CrcMismatch`]
    CrcMismatch,
    /// see [`Error::ReadFailed`]
    ReadFailed,
}

impl<E> Error<E> {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Install(_) => ErrorKind::Install,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Fail(_) => ErrorKind::Fail,
            Error::InvalidState(_) => ErrorKind::InvalidState,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::CrcMismatch(_) => ErrorKind::CrcMismatch,
            Error::ReadFailed => ErrorKind::ReadFailed,
        }
    }
}

impl<E: TransportError> Error<E> {
    /// Map a failed transaction onto the error taxonomy
    pub(crate) fn transaction(err: E) -> Self {
        match err.fault() {
            Fault::InvalidArgument => Error::InvalidArgument(err),
            Fault::Fail => Error::Fail(err),
            Fault::InvalidState => Error::InvalidState(err),
            Fault::Timeout => Error::Timeout(err),
        }
    }
}
