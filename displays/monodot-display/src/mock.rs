//! Test doubles for the transport and delay

extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::interface::DisplayInterface;

/// One recorded bus write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusWrite {
    Command(u8),
    Data(Vec<u8>),
}

/// Transport that records every write
#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub writes: Vec<BusWrite>,
    /// Fail every write once this many writes have succeeded
    pub fail_after: Option<usize>,
}

/// Error returned by [`RecordingInterface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl RecordingInterface {
    pub fn failing_after(writes: usize) -> Self {
        Self {
            writes: Vec::new(),
            fail_after: Some(writes),
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                BusWrite::Command(c) => Some(*c),
                BusWrite::Data(_) => None,
            })
            .collect()
    }

    pub fn data_writes(&self) -> Vec<&[u8]> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                BusWrite::Data(d) => Some(d.as_slice()),
                BusWrite::Command(_) => None,
            })
            .collect()
    }

    /// Page addresses selected with 0xB0..=0xBF, in order
    pub fn pages_written(&self) -> Vec<u8> {
        self.commands()
            .into_iter()
            .filter(|c| (0xB0..=0xBF).contains(c))
            .map(|c| c - 0xB0)
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    fn record(&mut self, write: BusWrite) -> Result<(), BusFault> {
        if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
            return Err(BusFault);
        }
        self.writes.push(write);
        Ok(())
    }
}

impl DisplayInterface for RecordingInterface {
    type Error = BusFault;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.record(BusWrite::Command(command))
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.record(BusWrite::Data(data.to_vec()))
    }
}

/// Delay that returns immediately but remembers how long it was asked to wait
#[derive(Debug, Default)]
pub struct NoopDelay {
    pub total_ns: u64,
}

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
