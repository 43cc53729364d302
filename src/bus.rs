//! Bring-up of the I²C controller and classification of its transaction errors.

use crate::hw_def::{DEFAULT_CLOCK_SPEED_HZ, DEFAULT_TRANSACTION_TIMEOUT_MS};

use embedded_hal::i2c::{Error as I2cError, ErrorKind};

#[cfg(feature = "defmt")]
use defmt::Format;

/// Internal pull-up setting of a bus line
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Pullup {
    /// use the MCU's internal pull-up
    #[default]
    Enabled,
    /// rely on external pull-up resistors
    Disabled,
}

/// Role of the MCU on the bus.  The HTU21D is always a target, so only controller mode exists.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BusMode {
    /// the MCU drives the clock
    #[default]
    Controller,
}

/// Everything a platform needs to bring up the I²C controller the sensor hangs off.
///
/// Defaults to port 0, SDA on GPIO 21, SCL on GPIO 22, internal pull-ups, 100 kHz and a
/// 1000 ms transaction timeout.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BusConfig {
    /// controller peripheral number
    pub port: u8,
    /// GPIO carrying SDA
    pub sda_pin: u8,
    /// GPIO carrying SCL
    pub scl_pin: u8,
    /// pull-up on SDA
    pub sda_pullup: Pullup,
    /// pull-up on SCL
    pub scl_pullup: Pullup,
    /// controller or target
    pub mode: BusMode,
    /// SCL frequency
    pub clock_speed_hz: u32,
    /// time after which a stuck transaction is abandoned
    pub timeout_ms: u32,
}
impl Default for BusConfig {
    fn default() -> Self {
        Self {
            port: 0,
            sda_pin: 21,
            scl_pin: 22,
            sda_pullup: Pullup::Enabled,
            scl_pullup: Pullup::Enabled,
            mode: BusMode::Controller,
            clock_speed_hz: DEFAULT_CLOCK_SPEED_HZ,
            timeout_ms: DEFAULT_TRANSACTION_TIMEOUT_MS,
        }
    }
}
impl BusConfig {
    /// Set the controller peripheral number.
    pub fn with_port(mut self, port: u8) -> Self {
        self.port = port;
        self
    }

    /// Set the SDA and SCL pins.
    pub fn with_pins(mut self, sda_pin: u8, scl_pin: u8) -> Self {
        self.sda_pin = sda_pin;
        self.scl_pin = scl_pin;
        self
    }

    /// Set the SDA and SCL pull-ups.
    pub fn with_pullups(mut self, sda_pullup: Pullup, scl_pullup: Pullup) -> Self {
        self.sda_pullup = sda_pullup;
        self.scl_pullup = scl_pullup;
        self
    }

    /// Set the per-transaction timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Platform hook that turns a [`BusConfig`] into a ready-to-use I²C bus.
///
/// `configure` validates and applies the pin, pull-up and clock settings; `install` takes
/// ownership of the peripheral and hands back the bus.  Both report errors in the bus's own
/// error type so the driver can tell them apart from each other and from transaction errors.
pub trait BusProvider {
    /// The installed bus
    type Bus;
    /// Error reported by configuration, installation and the bus itself
    type Error;

    /// Apply pin, pull-up, clock and timeout settings to the controller.
    fn configure(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Install the controller driver and return the bus.
    fn install(self, config: &BusConfig) -> Result<Self::Bus, Self::Error>;
}

/// Transport-level outcome of a failed transaction
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fault {
    /// the transaction was malformed
    InvalidArgument,
    /// the transaction was attempted and failed (NACK, overrun, ...)
    Fail,
    /// the bus was not in a state to run the transaction
    InvalidState,
    /// the transaction did not complete in time
    Timeout,
}
impl From<ErrorKind> for Fault {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus | ErrorKind::ArbitrationLoss => Fault::InvalidState,
            _ => Fault::Fail,
        }
    }
}

/// I²C error that can be sorted into a [`Fault`].
///
/// The default classification only sees [`ErrorKind`], which has no notion of timeouts or bad
/// arguments.  Bus implementations that can report those override [`TransportError::fault`].
pub trait TransportError: I2cError {
    /// Classify this error.
    fn fault(&self) -> Fault {
        Fault::from(self.kind())
    }
}

impl TransportError for ErrorKind {}

impl TransportError for core::convert::Infallible {}
