// src/driver/mock.rs

use core::time::Duration;
use heapless::{Deque, Vec};

use crate::common::{
    hal_traits::{Si8900Serial, Si8900Timer},
    timing::{POLL_INTERVAL_US, SETTLE_TIME},
};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

/// Scripted UART plus simulated clock.
///
/// Each `Some(byte)` in the read queue is delivered on one poll, each `None`
/// answers one poll with `WouldBlock`. An empty queue is a silent line.
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub current_time_us: u64,
    pub read_queue: Deque<Option<u8>, 256>,
    pub write_log: Vec<u8, 512>,
    pub fail_writes: bool,
    pub flush_count: u32,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes that are available immediately, one per poll.
    pub fn stage_read_data(&mut self, data: &[u8]) {
        for &byte in data {
            self.read_queue.push_back(Some(byte)).unwrap();
        }
    }

    /// Queues `polls` empty polls before the next staged byte.
    pub fn stage_gap(&mut self, polls: usize) {
        for _ in 0..polls {
            self.read_queue.push_back(None).unwrap();
        }
    }

    /// Queues enough empty polls for the default settle time to elapse, so
    /// a drain stops here instead of eating the bytes staged after it.
    pub fn stage_quiet_line(&mut self) {
        let polls = SETTLE_TIME.as_micros() / u128::from(POLL_INTERVAL_US) + 1;
        self.stage_gap(polls as usize);
    }

    pub fn written(&self) -> &[u8] {
        &self.write_log
    }
}

impl Si8900Timer for MockInterface {
    type Instant = MockInstant;

    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

impl Si8900Serial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.read_queue.pop_front() {
            Some(Some(byte)) => Ok(byte),
            _ => Err(nb::Error::WouldBlock),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.write_log
            .push(byte)
            .map_err(|_| nb::Error::Other(MockCommError))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }
}
