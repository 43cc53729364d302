//! Register map, command set and timing of the HTU21D(F), from the TE Connectivity datasheet.

#[cfg(feature = "defmt")]
use defmt::Format;

/// 7-bit I²C address of the HTU21D.  The part has no address-select pins.
pub const I2C_ADDR: u8 = 0x40;

/// Conversion wait after a no-hold trigger, covering the slowest (14-bit temperature) conversion.
pub const CONVERSION_TIME_MS: u32 = 50;

/// Time the sensor needs after a soft reset before it answers again.
pub const SOFT_RESET_TIME_MS: u32 = 15;

/// Bus clock used by [`BusConfig::default`](crate::BusConfig).
pub const DEFAULT_CLOCK_SPEED_HZ: u32 = 100_000;

/// Per-transaction timeout used by [`BusConfig::default`](crate::BusConfig).
pub const DEFAULT_TRANSACTION_TIMEOUT_MS: u32 = 1000;

/// The two least significant bits of a measurement word are status, not data.
pub const MEASUREMENT_STATUS_MASK: u16 = 0b0000_0000_0000_0011;

/// Status bit set by the sensor when the word holds a humidity measurement.
pub(crate) const MEASUREMENT_STATUS_HUMIDITY: u16 = 0b10;

/// Polynomial x^8 + x^5 + x^4 + 1 left-aligned over a 24-bit working register.
pub(crate) const CRC_DIVISOR: u32 = 0x0098_8000;

// User register layout
/// Resolution bits (7 and 0) of the user register.
pub const USER_REG_RESOLUTION_MASK: u8 = 0b1000_0001;
pub(crate) const USER_REG_LSBIT_END_OF_BATTERY: u8 = 6;
pub(crate) const USER_REG_LSBIT_HEATER_ENABLED: u8 = 2;
pub(crate) const USER_REG_LSBIT_DISABLE_OTP_RELOAD: u8 = 1;

/// Command opcodes understood by the HTU21D
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    /// Trigger a temperature measurement, bus released during conversion
    TriggerTempNoHold = 0xF3,
    /// Trigger a relative humidity measurement, bus released during conversion
    TriggerHumidityNoHold = 0xF5,
    /// Write the user register
    WriteUserRegister = 0xE6,
    /// Read the user register
    ReadUserRegister = 0xE7,
    /// Software reset
    SoftReset = 0xFE,
}
impl Command {
    /// Opcode as sent on the wire
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Direction bit appended to the 7-bit address after a START condition
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// controller to sensor
    Write = 0,
    /// sensor to controller
    Read = 1,
}

/// I²C address of the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct I2cAddr;
impl I2cAddr {
    /// 7-bit address
    pub const fn as_u8(self) -> u8 {
        I2C_ADDR
    }

    /// Address byte clocked out after START: the 7-bit address followed by the R/W bit
    pub const fn header(self, direction: Direction) -> u8 {
        (I2C_ADDR << 1) | direction as u8
    }
}
