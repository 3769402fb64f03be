//! Host-side doubles for the badge hardware
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};
use myrtio_badge::config::ConfigStorage;
use myrtio_badge::display::DisplayPins;

/// I2C bus that records every write and acknowledges a fixed address set
#[derive(Debug, Default)]
pub struct MockBus {
    present: Vec<u8>,
    pub writes: Vec<(u8, Vec<u8>)>,
}

impl MockBus {
    pub fn with_devices(present: &[u8]) -> Self {
        Self {
            present: present.to_vec(),
            writes: Vec::new(),
        }
    }

    /// `(register, value)` writes sent to `address`, in order
    pub fn registers(&self, address: u8) -> Vec<(u8, u8)> {
        self.writes
            .iter()
            .filter(|(addr, bytes)| *addr == address && bytes.len() == 2)
            .map(|(_, bytes)| (bytes[0], bytes[1]))
            .collect()
    }

    /// Register writes to `address` that are not update strobes
    pub fn pwm_writes(&self, address: u8) -> Vec<(u8, u8)> {
        self.registers(address)
            .into_iter()
            .filter(|&(reg, _)| reg != 0x49)
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl i2c::ErrorType for MockBus {
    type Error = ErrorKind;
}

impl i2c::I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.present.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if !bytes.is_empty() {
                        self.writes.push((address, bytes.to_vec()));
                    }
                }
                Operation::Read(buf) => buf.fill(0),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    A0,
    A1,
    Wr0,
    Wr1,
    Data,
    Clock,
    Latch,
}

pub type PinLog = Rc<RefCell<Vec<(PinId, bool)>>>;

/// Output pin appending every level change to a shared log
pub struct MockPin {
    id: PinId,
    log: PinLog,
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, true));
        Ok(())
    }
}

pub fn display_pins() -> (DisplayPins<MockPin>, PinLog) {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let pin = |id| MockPin {
        id,
        log: Rc::clone(&log),
    };
    let pins = DisplayPins {
        a0: pin(PinId::A0),
        a1: pin(PinId::A1),
        wr0: pin(PinId::Wr0),
        wr1: pin(PinId::Wr1),
        sr_data: pin(PinId::Data),
        sr_clock: pin(PinId::Clock),
        sr_latch: pin(PinId::Latch),
    };
    (pins, log)
}

/// One character strobed into a display, decoded from the pin log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strobe {
    /// 0 for the first display, 1 for the second
    pub panel: usize,
    /// Address lines at strobe time
    pub address: u8,
    /// Pattern shifted in, LSB first
    pub pattern: u8,
}

/// Replay a pin log and collect every display write
pub fn decode_strobes(log: &[(PinId, bool)]) -> Vec<Strobe> {
    let mut strobes = Vec::new();
    let (mut a0, mut a1, mut data) = (false, false, false);
    let mut shifted: Vec<bool> = Vec::new();
    let mut wr_low: Option<usize> = None;

    for &(id, level) in log {
        match (id, level) {
            (PinId::A0, l) => a0 = l,
            (PinId::A1, l) => a1 = l,
            (PinId::Data, l) => data = l,
            (PinId::Clock, true) => shifted.push(data),
            (PinId::Wr0, false) => wr_low = Some(0),
            (PinId::Wr1, false) => wr_low = Some(1),
            (PinId::Latch, true) => {
                if let Some(panel) = wr_low {
                    let bits = &shifted[shifted.len().saturating_sub(7)..];
                    let pattern = bits
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << i));
                    strobes.push(Strobe {
                        panel,
                        address: u8::from(a0) | (u8::from(a1) << 1),
                        pattern,
                    });
                    shifted.clear();
                }
            }
            (PinId::Wr0 | PinId::Wr1, true) => wr_low = None,
            _ => {}
        }
    }
    strobes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageFault;

/// Config storage held in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub document: Vec<u8>,
    pub stores: usize,
    pub fail_stores: bool,
}

impl MemoryStorage {
    pub fn new(document: &str) -> Self {
        Self {
            document: document.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    pub fn document_str(&self) -> &str {
        std::str::from_utf8(&self.document).unwrap()
    }
}

impl ConfigStorage for MemoryStorage {
    type Error = StorageFault;

    fn load(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let len = self.document.len();
        buf.get_mut(..len)
            .ok_or(StorageFault)?
            .copy_from_slice(&self.document);
        Ok(len)
    }

    fn store(&mut self, document: &[u8]) -> Result<(), Self::Error> {
        if self.fail_stores {
            return Err(StorageFault);
        }
        self.document = document.to_vec();
        self.stores += 1;
        Ok(())
    }
}

/// Delay that only adds up the time it was asked to wait
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}
