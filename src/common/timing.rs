// src/common/timing.rs

use core::time::Duration;

// Default bounds for every wait the driver performs. The sensor itself has
// no timeouts, so these only keep the host from hanging on a silent line.

// === Auto-baud ===

/// Maximum calibration bytes sent before giving up on auto-baud.
pub const HANDSHAKE_MAX_ATTEMPTS: u16 = 64;
/// Wall-clock budget for the whole auto-baud sequence.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(500);
/// How long to wait for the sensor's answer to one calibration byte.
pub const CALIBRATION_INTERVAL: Duration = Duration::from_millis(10);

// === Command / response ===

/// Maximum transmissions of a command byte waiting for its echo.
pub const ECHO_MAX_ATTEMPTS: u8 = 8;
/// Maximum wait for a single response byte.
pub const BYTE_TIMEOUT: Duration = Duration::from_millis(20);
/// Maximum wait for the transmit buffer to accept and flush one byte.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(10);

/// Quiet time that marks the receive line as idle when discarding stale bytes.
pub const SETTLE_TIME: Duration = Duration::from_millis(1);
/// Upper bound on bytes discarded in one drain, so a streaming sensor cannot
/// keep the driver draining forever.
pub const DRAIN_MAX_BYTES: usize = 64;

// === Polling ===

/// Pause between polls of a non-blocking operation, in microseconds.
pub const POLL_INTERVAL_US: u32 = 100;

// === Byte timing (8N1) ===

/// Bits on the wire per byte: start + 8 data + stop.
pub const BITS_PER_BYTE: u32 = 10;

/// Nominal duration of one byte at `baud`.
pub fn byte_duration(baud: u32) -> Duration {
    let baud = baud.max(1);
    Duration::from_nanos(u64::from(BITS_PER_BYTE) * 1_000_000_000 / u64::from(baud))
}
