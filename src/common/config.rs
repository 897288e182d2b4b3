// src/common/config.rs

use core::time::Duration;

use super::timing;

/// Retry and timeout budget for a [`SyncDriver`](crate::driver::SyncDriver).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Calibration bytes to send before auto-baud fails.
    pub handshake_max_attempts: u16,
    /// Wall-clock budget for auto-baud.
    pub handshake_timeout: Duration,
    /// Wait for an answer to each calibration byte.
    pub calibration_interval: Duration,
    /// Command transmissions before an echo mismatch becomes an error. At least 1.
    pub echo_max_attempts: u8,
    /// Wait for each received byte.
    pub byte_timeout: Duration,
    /// Wait for each transmitted byte to be accepted and flushed.
    pub write_timeout: Duration,
    /// Quiet time after which stale received bytes are considered drained.
    pub settle_time: Duration,
    /// Pause between polls of the transport.
    pub poll_interval_us: u32,
}

impl DriverConfig {
    pub const fn new() -> Self {
        DriverConfig {
            handshake_max_attempts: timing::HANDSHAKE_MAX_ATTEMPTS,
            handshake_timeout: timing::HANDSHAKE_TIMEOUT,
            calibration_interval: timing::CALIBRATION_INTERVAL,
            echo_max_attempts: timing::ECHO_MAX_ATTEMPTS,
            byte_timeout: timing::BYTE_TIMEOUT,
            write_timeout: timing::WRITE_TIMEOUT,
            settle_time: timing::SETTLE_TIME,
            poll_interval_us: timing::POLL_INTERVAL_US,
        }
    }

    /// Defaults with byte waits derived from a known baud rate: a few byte
    /// times plus a fixed margin.
    pub fn for_baud(baud: u32) -> Self {
        let byte = timing::byte_duration(baud);
        Self::new()
            .with_byte_timeout(byte * 4 + Duration::from_millis(2))
            .with_write_timeout(byte * 2 + Duration::from_millis(2))
    }

    pub const fn with_handshake_max_attempts(mut self, attempts: u16) -> Self {
        self.handshake_max_attempts = attempts;
        self
    }

    pub const fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    pub const fn with_calibration_interval(mut self, interval: Duration) -> Self {
        self.calibration_interval = interval;
        self
    }

    pub const fn with_echo_max_attempts(mut self, attempts: u8) -> Self {
        self.echo_max_attempts = if attempts == 0 { 1 } else { attempts };
        self
    }

    pub const fn with_byte_timeout(mut self, timeout: Duration) -> Self {
        self.byte_timeout = timeout;
        self
    }

    pub const fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub const fn with_settle_time(mut self, settle: Duration) -> Self {
        self.settle_time = settle;
        self
    }

    pub const fn with_poll_interval_us(mut self, us: u32) -> Self {
        self.poll_interval_us = us;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
