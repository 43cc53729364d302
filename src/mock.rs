//! Test doubles shared by the blocking and async driver tests.

use crate::bus::{BusConfig, BusProvider, Fault, TransportError};

use embedded_hal::i2c::{Error as I2cError, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
use std::collections::VecDeque;

/// Bus error carrying both the embedded-hal kind and the fault class the driver should see.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BusFault {
    pub(crate) kind: ErrorKind,
    pub(crate) fault: Fault,
}
impl BusFault {
    pub(crate) fn new(fault: Fault) -> Self {
        Self {
            kind: ErrorKind::Other,
            fault,
        }
    }
}
impl I2cError for BusFault {
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}
impl TransportError for BusFault {
    fn fault(&self) -> Fault {
        self.fault
    }
}

/// Scripted I²C bus.
///
/// Failing transactions are scripted with `Transaction::with_error`; each failure takes the next
/// fault queued with [`MockBus::fail_as`], or the default classification of its kind.
#[derive(Clone, Debug)]
pub(crate) struct MockBus {
    inner: I2cMock,
    faults: VecDeque<Fault>,
}
impl MockBus {
    pub(crate) fn new(expected: &[Transaction]) -> Self {
        Self {
            inner: I2cMock::new(expected),
            faults: VecDeque::new(),
        }
    }

    pub(crate) fn fail_as(mut self, fault: Fault) -> Self {
        self.faults.push_back(fault);
        self
    }

    pub(crate) fn done(&mut self) {
        self.inner.done();
    }

    fn classify(&mut self, kind: ErrorKind) -> BusFault {
        let fault = self.faults.pop_front().unwrap_or(Fault::from(kind));
        BusFault { kind, fault }
    }
}
impl ErrorType for MockBus {
    type Error = BusFault;
}
impl I2c for MockBus {
    fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), BusFault> {
        self.inner.read(address, read).map_err(|kind| self.classify(kind))
    }

    fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), BusFault> {
        self.inner.write(address, write).map_err(|kind| self.classify(kind))
    }

    fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), BusFault> {
        self.inner
            .transaction(address, operations)
            .map_err(|kind| self.classify(kind))
    }
}
#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for MockBus {
    async fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), BusFault> {
        I2c::read(self, address, read)
    }

    async fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), BusFault> {
        I2c::write(self, address, write)
    }

    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), BusFault> {
        I2c::transaction(self, address, operations)
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) total_ns: u64,
    pub(crate) calls: usize,
}
impl RecordingDelay {
    pub(crate) fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}
impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}

/// Bus bring-up backed by a mock bus, failing at the configured step.
pub(crate) struct MockProvider {
    pub(crate) bus: Option<MockBus>,
    pub(crate) configure_error: Option<BusFault>,
    pub(crate) install_error: Option<BusFault>,
}
impl MockProvider {
    pub(crate) fn new(bus: MockBus) -> Self {
        Self {
            bus: Some(bus),
            configure_error: None,
            install_error: None,
        }
    }
}
impl BusProvider for MockProvider {
    type Bus = MockBus;
    type Error = BusFault;

    fn configure(&mut self, config: &BusConfig) -> Result<(), BusFault> {
        assert_eq!(config.clock_speed_hz, 100_000);
        match self.configure_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn install(mut self, _config: &BusConfig) -> Result<MockBus, BusFault> {
        match self.install_error.take() {
            Some(err) => Err(err),
            None => Ok(self.bus.take().expect("bus already installed")),
        }
    }
}
impl Drop for MockProvider {
    // a bus that was never installed had no traffic
    fn drop(&mut self) {
        if let Some(mut bus) = self.bus.take() {
            bus.done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_faults_classify_failures_in_order() {
        let mut bus = MockBus::new(&[
            Transaction::write(0x40, vec![0xFE]).with_error(ErrorKind::Other),
            Transaction::write(0x40, vec![0xFE]).with_error(ErrorKind::Other),
            Transaction::write(0x40, vec![0xFE]).with_error(ErrorKind::Bus),
        ])
        .fail_as(Fault::Timeout)
        .fail_as(Fault::InvalidArgument);
        assert_eq!(bus.write(0x40, &[0xFE]).unwrap_err().fault(), Fault::Timeout);
        assert_eq!(bus.write(0x40, &[0xFE]).unwrap_err().fault(), Fault::InvalidArgument);
        let err = bus.write(0x40, &[0xFE]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bus);
        assert_eq!(err.fault(), Fault::InvalidState);
        bus.done();
    }
}
