// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point in time as reported by an [`Si8900Timer`].
///
/// Only differences and ordering are used, so any monotonic tick
/// representation works.
pub trait Si8900Instant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

// Blanket implementation
impl<T> Si8900Instant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations needed to bound every wait.
///
/// Note: `delay_us`/`delay_ms` mirror `embedded_hal::delay::DelayNs`; the
/// `impl-native` adapter forwards to one.
pub trait Si8900Timer {
    type Instant: Si8900Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the sensor UART: non-blocking, one byte at a time.
///
/// `Err(nb::Error::WouldBlock)` from `read_byte` is the "no new data"
/// signal; the driver polls it under a deadline.
pub trait Si8900Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` while the transmit buffer is not ready.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
