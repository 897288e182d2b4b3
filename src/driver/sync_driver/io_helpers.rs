// src/driver/sync_driver/io_helpers.rs

use super::SyncDriver; // Access SyncDriver definition
use crate::common::{
    error::Si8900Error,
    hal_traits::{Si8900Serial, Si8900Timer},
    timing::DRAIN_MAX_BYTES,
};
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> SyncDriver<IF>
where
    IF: Si8900Serial + Si8900Timer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, Si8900Error<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Si8900Error::Timeout);
                    }
                    self.interface.delay_us(self.config.poll_interval_us);
                }
                Err(nb::Error::Other(e)) => return Err(Si8900Error::Io(e)),
            }
        }
    }

    /// Sends one byte and waits until it has left the transmit buffer.
    pub(super) fn transmit_byte(&mut self, byte: u8) -> Result<(), Si8900Error<IF::Error>> {
        let timeout = self.config.write_timeout;
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.write_byte(byte))?;
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.flush())
    }

    /// Waits up to the configured byte timeout for one received byte.
    pub(super) fn receive_byte(&mut self) -> Result<u8, Si8900Error<IF::Error>> {
        self.receive_byte_within(self.config.byte_timeout)
    }

    pub(super) fn receive_byte_within(
        &mut self,
        timeout: Duration,
    ) -> Result<u8, Si8900Error<IF::Error>> {
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte())
    }

    /// Discards received bytes until the line stays quiet for `settle_time`.
    ///
    /// Returns the number of bytes thrown away. Stops early after
    /// `DRAIN_MAX_BYTES` so a streaming sensor cannot hold the driver here.
    pub(super) fn drain_rx(&mut self) -> Result<usize, Si8900Error<IF::Error>> {
        let settle = self.config.settle_time;
        let mut drained = 0;
        while drained < DRAIN_MAX_BYTES {
            match self.receive_byte_within(settle) {
                Ok(_) => drained += 1,
                Err(Si8900Error::Timeout) => break,
                Err(e) => return Err(e),
            }
        }
        if drained > 0 {
            #[cfg(feature = "log")]
            log::debug!("si8900: discarded {} stale bytes", drained);
        }
        Ok(drained)
    }

    /// Fails with `NotCalibrated` unless auto-baud has locked.
    pub(super) fn ensure_locked(&self) -> Result<(), Si8900Error<IF::Error>> {
        if self.link.state().is_locked() {
            Ok(())
        } else {
            Err(Si8900Error::NotCalibrated)
        }
    }
}
