// src/driver/sync_driver/handshake.rs

use super::SyncDriver;
use crate::common::{
    error::Si8900Error,
    handshake::HandshakeStep,
    hal_traits::{Si8900Serial, Si8900Timer},
};

impl<IF> SyncDriver<IF>
where
    IF: Si8900Serial + Si8900Timer,
{
    /// Runs the auto-baud handshake until the sensor confirms twice in a row.
    ///
    /// One calibration byte is sent per attempt, then the driver waits up to
    /// `calibration_interval` for an answer. Fails with `HandshakeTimeout`
    /// once `handshake_max_attempts` bytes have been sent or
    /// `handshake_timeout` has elapsed. Transport errors abort immediately.
    /// On any failure the link is left uncalibrated.
    ///
    /// After locking, late answers to earlier calibration bytes are drained
    /// so the first command reads its own echo.
    pub fn handshake(&mut self) -> Result<(), Si8900Error<IF::Error>> {
        let deadline = self.interface.now() + self.config.handshake_timeout;
        let mut next = self.link.start();
        let mut attempts: u16 = 0;

        loop {
            if attempts >= self.config.handshake_max_attempts || self.interface.now() >= deadline {
                #[cfg(feature = "log")]
                log::warn!("si8900: auto-baud gave up after {} calibration bytes", attempts);
                self.link.reset();
                return Err(Si8900Error::HandshakeTimeout { attempts });
            }

            if let Err(e) = self.transmit_byte(next) {
                self.link.reset();
                return Err(e);
            }
            attempts += 1;

            match self.receive_byte_within(self.config.calibration_interval) {
                Ok(byte) => match self.link.on_byte(byte) {
                    HandshakeStep::Locked => {
                        #[cfg(feature = "log")]
                        log::debug!("si8900: link locked after {} calibration bytes", attempts);
                        if let Err(e) = self.drain_rx() {
                            self.link.reset();
                            return Err(e);
                        }
                        return Ok(());
                    }
                    HandshakeStep::Transmit(byte_to_send) => next = byte_to_send,
                },
                // Silent line: keep calibrating
                Err(Si8900Error::Timeout) => {}
                Err(e) => {
                    self.link.reset();
                    return Err(e);
                }
            }
        }
    }
}
