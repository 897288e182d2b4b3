// src/common/native.rs

//! Adapter from `embedded-io` + `embedded-hal` peripherals to the driver traits.

use core::ops::{Add, Sub};
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write, WriteReady};

use super::hal_traits::{Si8900Serial, Si8900Timer};

/// Time elapsed according to the adapter's own delay calls, in microseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(u64);

impl TickInstant {
    pub const fn as_micros(&self) -> u64 {
        self.0
    }
}

impl Add<Duration> for TickInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        let us = u64::try_from(rhs.as_micros()).unwrap_or(u64::MAX);
        TickInstant(self.0.saturating_add(us))
    }
}

impl Sub<TickInstant> for TickInstant {
    type Output = Duration;
    fn sub(self, rhs: TickInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

/// Wraps a UART and a delay provider so a [`SyncDriver`](crate::driver::SyncDriver)
/// can run on them.
///
/// There is no hardware clock here: `now()` advances only by the delays the
/// driver requests while polling. Timeouts therefore bound the polling effort,
/// and real elapsed time is at least that long.
pub struct NativeAdapter<U, D> {
    uart: U,
    delay: D,
    elapsed_us: u64,
}

impl<U, D> NativeAdapter<U, D>
where
    U: Read + Write + ReadReady + WriteReady,
    D: DelayNs,
{
    pub fn new(uart: U, delay: D) -> Self {
        NativeAdapter {
            uart,
            delay,
            elapsed_us: 0,
        }
    }

    pub fn release(self) -> (U, D) {
        (self.uart, self.delay)
    }
}

impl<U, D> Si8900Serial for NativeAdapter<U, D>
where
    U: Read + Write + ReadReady + WriteReady,
    D: DelayNs,
{
    type Error = U::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if !self.uart.read_ready()? {
            return Err(nb::Error::WouldBlock);
        }
        let mut buf = [0u8; 1];
        match self.uart.read(&mut buf)? {
            0 => Err(nb::Error::WouldBlock),
            _ => Ok(buf[0]),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if !self.uart.write_ready()? {
            return Err(nb::Error::WouldBlock);
        }
        match self.uart.write(&[byte])? {
            0 => Err(nb::Error::WouldBlock),
            _ => Ok(()),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.uart.flush().map_err(nb::Error::Other)
    }
}

impl<U, D> Si8900Timer for NativeAdapter<U, D>
where
    U: Read + Write + ReadReady + WriteReady,
    D: DelayNs,
{
    type Instant = TickInstant;

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
        self.elapsed_us = self.elapsed_us.saturating_add(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.elapsed_us = self.elapsed_us.saturating_add(u64::from(ms) * 1000);
    }

    fn now(&self) -> Self::Instant {
        TickInstant(self.elapsed_us)
    }
}
