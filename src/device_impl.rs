use crate::*;

use embedded_hal::{delay::DelayNs, i2c::I2c};

impl<I2C, Delay, E> Htu21d<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
    E: TransportError,
{
    /// Create a new HTU21D driver instance on an already configured bus
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self {
            i2c,
            delay,
            i2c_addr: I2cAddr,
            crc_policy: CrcPolicy::default(),
        }
    }

    /// Bring up the I²C controller, then probe for the sensor
    pub fn init<P>(mut provider: P, config: &BusConfig, delay: Delay) -> Result<Self, Error<E>>
    where
        P: BusProvider<Bus = I2C, Error = E>,
    {
        debug!(
            "htu21d::init(): port={} sda={} scl={} clock={}Hz",
            config.port, config.sda_pin, config.scl_pin, config.clock_speed_hz
        );
        provider.configure(config).map_err(Error::Config)?;
        let i2c = provider.install(config).map_err(Error::Install)?;
        let mut htu21d = Self::new(i2c, delay);
        htu21d.probe()?;
        Ok(htu21d)
    }

    /// Choose how measurement words with a bad checksum are handled
    pub fn with_crc_policy(mut self, crc_policy: CrcPolicy) -> Self {
        self.crc_policy = crc_policy;
        self
    }

    /// Current checksum policy
    pub fn crc_policy(&self) -> CrcPolicy {
        self.crc_policy
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    /// Address the sensor without payload and check that it acknowledges
    pub fn probe(&mut self) -> Result<(), Error<E>> {
        if let Err(i2c_err) = self.i2c.write(self.i2c_addr.as_u8(), &[]) {
            warn!(
                "htu21d::probe(): no ack for header 0x{:x}: {:?}",
                self.i2c_addr.header(Direction::Write),
                i2c_err.fault()
            );
            return Err(Error::NotFound(i2c_err));
        }
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error<E>> {
        if let Err(i2c_err) = self.i2c.write(self.i2c_addr.as_u8(), bytes) {
            trace!(
                "htu21d::send(): header 0x{:x}, {} bytes failed: {:?}",
                self.i2c_addr.header(Direction::Write),
                bytes.len(),
                i2c_err.fault()
            );
            return Err(Error::transaction(i2c_err));
        }
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Error<E>> {
        if let Err(i2c_err) = self.i2c.read(self.i2c_addr.as_u8(), buf) {
            trace!(
                "htu21d::receive(): header 0x{:x}, {} bytes failed: {:?}",
                self.i2c_addr.header(Direction::Read),
                buf.len(),
                i2c_err.fault()
            );
            return Err(Error::transaction(i2c_err));
        }
        Ok(())
    }

    /// software reset
    ///
    /// Returns as soon as the command is sent.  The sensor needs [`SOFT_RESET_TIME_MS`] before it
    /// answers again.
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        self.send(&[Command::SoftReset.as_u8()])
    }

    /// Read the user register
    pub fn read_user_register(&mut self) -> Result<UserRegister, Error<E>> {
        self.send(&[Command::ReadUserRegister.as_u8()])?;
        let mut read_buf = [0u8; 1];
        self.receive(&mut read_buf)?;
        trace!("htu21d::read_user_register(): 0x{:x}", read_buf[0]);
        Ok(UserRegister::from(read_buf[0]))
    }

    /// Write the user register as is
    pub fn write_user_register(&mut self, value: u8) -> Result<(), Error<E>> {
        trace!("htu21d::write_user_register(): 0x{:x}", value);
        self.send(&[Command::WriteUserRegister.as_u8(), value])
    }

    /// Resolution bits 7 and 0 of the user register
    pub fn get_resolution(&mut self) -> Result<u8, Error<E>> {
        Ok(self.read_user_register()?.resolution_bits())
    }

    /// Replace the resolution bits 7 and 0 of the user register, keeping the others
    ///
    /// Not atomic: another writer between the read and the write is overwritten.
    pub fn set_resolution(&mut self, resolution: u8) -> Result<(), Error<E>> {
        let reg = self.read_user_register()?.with_resolution_bits(resolution);
        self.write_user_register(reg.raw())
    }

    /// Decoded measurement resolution
    pub fn resolution_mode(&mut self) -> Result<Resolution, Error<E>> {
        Ok(self.read_user_register()?.resolution())
    }

    /// Select a measurement resolution
    pub fn set_resolution_mode(&mut self, resolution: Resolution) -> Result<(), Error<E>> {
        self.set_resolution(resolution.bits())
    }

    /// On-chip heater
    pub fn set_heater(&mut self, enabled: bool) -> Result<(), Error<E>> {
        let reg = self.read_user_register()?.with_heater(enabled);
        self.write_user_register(reg.raw())
    }

    /// Supply voltage has dropped below 2.25 V
    pub fn end_of_battery(&mut self) -> Result<bool, Error<E>> {
        Ok(self.read_user_register()?.end_of_battery())
    }

    /// Trigger a no-hold measurement, wait out the conversion and read back the word
    pub fn read_value(&mut self, trigger: Trigger) -> Result<RawWord, Error<E>> {
        self.send(&[trigger.command().as_u8()])?;
        self.delay.delay_ms(CONVERSION_TIME_MS);

        let mut read_buf = [0u8; 3];
        self.receive(&mut read_buf)?;
        let raw = RawWord::from_bytes(read_buf);
        if !raw.crc_valid() {
            warn!("htu21d::read_value(): crc mismatch: read_buf={:?}", read_buf);
            if self.crc_policy == CrcPolicy::Reject {
                return Err(Error::CrcMismatch(raw));
            }
        }
        Ok(raw)
    }

    /// Measure temperature
    pub fn read_temperature(&mut self) -> Result<Temperature, Error<E>> {
        let raw = self.read_value(Trigger::Temperature)?;
        if raw.value() == 0 {
            return Err(Error::ReadFailed);
        }
        Ok(Temperature(raw))
    }

    /// Measure relative humidity
    pub fn read_humidity(&mut self) -> Result<Humidity, Error<E>> {
        let raw = self.read_value(Trigger::Humidity)?;
        if raw.value() == 0 {
            return Err(Error::ReadFailed);
        }
        Ok(Humidity(raw))
    }
}
