use crate::checksum::is_crc_valid;
use crate::hw_def::*;

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

/// Value the legacy conversions return in place of a reading that could not be taken
pub const READ_FAILED_SENTINEL: f32 = -999.0;

/// Temperature coefficient of the humidity sensor, %RH per °C, for compensation around 25 °C
pub const HUMIDITY_TEMP_COEFFICIENT: f32 = -0.15;

/// Convert a raw temperature word to degrees centigrade.  A raw value of 0 marks a failed read
/// and converts to [`READ_FAILED_SENTINEL`].
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    if raw == 0 {
        return READ_FAILED_SENTINEL;
    }
    (raw as f32 * 175.72 / 65536.0) - 46.85
}

/// Convert a raw humidity word to percent relative humidity.  A raw value of 0 marks a failed
/// read and converts to [`READ_FAILED_SENTINEL`].  Results slightly outside 0..=100 are not
/// clamped.
pub fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    if raw == 0 {
        return READ_FAILED_SENTINEL;
    }
    (raw as f32 * 125.0 / 65536.0) - 6.0
}

/// Convert degrees centigrade to Fahrenheit
pub fn celsius_to_fahrenheit(centigrade: f32) -> f32 {
    (centigrade * 9.0 / 5.0) + 32.0
}

/// What to do when a measurement word arrives with a bad checksum
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CrcPolicy {
    /// log a warning and hand back the word anyway, flagged through [`RawWord::crc_valid`]
    #[default]
    Warn,
    /// fail the read with [`Error::CrcMismatch`](crate::Error::CrcMismatch)
    Reject,
}

/// Measurement word as received from the device, with its checksum
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawWord {
    word: u16,
    crc: u8,
}
impl RawWord {
    /// Assemble from the three bytes of a measurement read: MSB, LSB, CRC
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            word: u16::from_be_bytes([bytes[0], bytes[1]]),
            crc: bytes[2],
        }
    }
    /// Measurement value with the status bits cleared
    pub fn value(&self) -> u16 {
        self.word & !MEASUREMENT_STATUS_MASK
    }
    /// Word exactly as transmitted, status bits included
    pub fn word(&self) -> u16 {
        self.word
    }
    /// Checksum transmitted after the word
    pub fn crc(&self) -> u8 {
        self.crc
    }
    /// Whether the checksum matches the word
    pub fn crc_valid(&self) -> bool {
        is_crc_valid(self.word, self.crc)
    }
    /// The two status bits
    pub fn status(&self) -> u8 {
        (self.word & MEASUREMENT_STATUS_MASK) as u8
    }
    /// The device flags humidity words in the status bits
    pub fn is_humidity(&self) -> bool {
        self.word & MEASUREMENT_STATUS_HUMIDITY != 0
    }
}
impl fmt::Display for RawWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X} (crc 0x{:02X}", self.word, self.crc)?;
        if !self.crc_valid() {
            write!(f, ", mismatch")?;
        }
        write!(f, ")")
    }
}

/// Temperature sample
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Temperature(pub(crate) RawWord);
impl From<RawWord> for Temperature {
    fn from(raw: RawWord) -> Self {
        Self(raw)
    }
}
impl Temperature {
    /// Get temperature in Centigrade
    pub fn centigrade(&self) -> f32 {
        raw_temp_to_centigrade(self.0.value())
    }
    /// Get temperature in Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        celsius_to_fahrenheit(self.centigrade())
    }
    /// Underlying measurement word
    pub fn raw(&self) -> RawWord {
        self.0
    }
}

/// Relative humidity sample
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Humidity(pub(crate) RawWord);
impl From<RawWord> for Humidity {
    fn from(raw: RawWord) -> Self {
        Self(raw)
    }
}
impl Humidity {
    /// Get relative humidity in percent
    pub fn percent(&self) -> f32 {
        raw_rel_humid_to_percent(self.0.value())
    }
    /// Relative humidity corrected for the sensor's temperature coefficient
    pub fn compensated_percent(&self, temperature: &Temperature) -> f32 {
        compensate_humidity(self.percent(), temperature.centigrade())
    }
    /// Underlying measurement word
    pub fn raw(&self) -> RawWord {
        self.0
    }
}

/// Correct a relative humidity reading taken at `centigrade` to its 25 °C equivalent
pub fn compensate_humidity(percent: f32, centigrade: f32) -> f32 {
    percent + (25.0 - centigrade) * HUMIDITY_TEMP_COEFFICIENT
}

/// Measurement resolution combinations selected by user register bits 7 and 0
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Resolution {
    /// 12 bit RH, 14 bit temperature (power-on default)
    #[default]
    Rh12Temp14,
    /// 8 bit RH, 12 bit temperature
    Rh8Temp12,
    /// 10 bit RH, 13 bit temperature
    Rh10Temp13,
    /// 11 bit RH, 11 bit temperature
    Rh11Temp11,
}
impl Resolution {
    /// Register bits 7 and 0 for this resolution
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Rh12Temp14 => 0b0000_0000,
            Resolution::Rh8Temp12 => 0b0000_0001,
            Resolution::Rh10Temp13 => 0b1000_0000,
            Resolution::Rh11Temp11 => 0b1000_0001,
        }
    }
}
impl From<u8> for Resolution {
    fn from(raw: u8) -> Self {
        match raw & USER_REG_RESOLUTION_MASK {
            0b0000_0000 => Resolution::Rh12Temp14,
            0b0000_0001 => Resolution::Rh8Temp12,
            0b1000_0000 => Resolution::Rh10Temp13,
            _ => Resolution::Rh11Temp11,
        }
    }
}

/// Contents of the user register
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserRegister(u8);
impl From<u8> for UserRegister {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}
impl UserRegister {
    /// Get the raw register value
    pub fn raw(&self) -> u8 {
        self.0
    }
    /// Resolution bits 7 and 0, all other bits cleared
    pub fn resolution_bits(&self) -> u8 {
        self.0 & USER_REG_RESOLUTION_MASK
    }
    /// Decoded resolution
    pub fn resolution(&self) -> Resolution {
        Resolution::from(self.0)
    }
    /// Supply voltage has dropped below 2.25 V
    pub fn end_of_battery(&self) -> bool {
        self.0 & (1 << USER_REG_LSBIT_END_OF_BATTERY) != 0
    }
    /// On-chip heater is enabled
    pub fn heater_enabled(&self) -> bool {
        self.0 & (1 << USER_REG_LSBIT_HEATER_ENABLED) != 0
    }
    /// Default settings are not reloaded from OTP on reset
    pub fn otp_reload_disabled(&self) -> bool {
        self.0 & (1 << USER_REG_LSBIT_DISABLE_OTP_RELOAD) != 0
    }
    /// Replace the resolution bits, keeping every other bit.  Only bits 7 and 0 of
    /// `resolution` are used.
    pub fn with_resolution_bits(self, resolution: u8) -> Self {
        Self((self.0 & !USER_REG_RESOLUTION_MASK) | (resolution & USER_REG_RESOLUTION_MASK))
    }
    /// Switch the heater on or off, keeping every other bit
    pub fn with_heater(self, enabled: bool) -> Self {
        let mask = 1 << USER_REG_LSBIT_HEATER_ENABLED;
        if enabled {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }
}
impl fmt::Display for UserRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserRegister {{ 0x{:02x}; {:?} ", self.0, self.resolution())?;
        if self.end_of_battery() {
            write!(f, "end_of_battery ")?;
        }
        if self.heater_enabled() {
            write!(f, "heater_enabled ")?;
        }
        if self.otp_reload_disabled() {
            write!(f, "otp_reload_disabled ")?;
        }
        write!(f, "}}")
    }
}
