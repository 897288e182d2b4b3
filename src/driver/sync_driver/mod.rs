// src/driver/sync_driver/mod.rs

use crate::common::{
    config::DriverConfig,
    frame::HAND_SHAKED,
    handshake::{AutoBaud, HandshakeState},
    hal_traits::{Si8900Serial, Si8900Timer},
};

// Implementation blocks for the driver live in these files
mod handshake;
mod io_helpers;
mod transaction;

/// Blocking Si8900 driver over an injected UART + timer.
///
/// Every exchange takes `&mut self`, so a command and its response bytes
/// can never interleave with another exchange on the same driver.
#[derive(Debug)]
pub struct SyncDriver<IF>
where
    IF: Si8900Serial + Si8900Timer,
{
    interface: IF,
    config: DriverConfig,
    link: AutoBaud,
}

impl<IF> SyncDriver<IF>
where
    IF: Si8900Serial + Si8900Timer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, DriverConfig::default())
    }

    pub fn with_config(interface: IF, config: DriverConfig) -> Self {
        SyncDriver {
            interface,
            config,
            link: AutoBaud::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DriverConfig) {
        self.config = config;
    }

    /// Current auto-baud state of the link.
    #[inline]
    pub fn state(&self) -> HandshakeState {
        self.link.state()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.link.state().is_locked()
    }

    /// Marks the link calibrated without running auto-baud.
    pub fn assume_locked(&mut self) {
        self.link = AutoBaud::locked();
    }

    /// Skips auto-baud if `status` is the `HAND_SHAKED` byte saved from an
    /// earlier session. Returns whether the link is now considered locked.
    pub fn resume(&mut self, status: u8) -> bool {
        if status == HAND_SHAKED {
            self.assume_locked();
        }
        self.is_locked()
    }

    /// Forgets calibration; the next command requires a new handshake.
    pub fn invalidate(&mut self) {
        self.link.reset();
    }

    /// Gives the interface back.
    pub fn release(self) -> IF {
        self.interface
    }
}
