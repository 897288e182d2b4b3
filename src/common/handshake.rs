// src/common/handshake.rs

//! Auto-baud handshake state machine.
//!
//! The host repeats the calibration byte until the sensor answers with two
//! consecutive confirmation bytes. This module only holds the transition
//! logic; the driver runs it over a transport with bounded waits.

use super::frame::{CAL_BYTE, CONFIRM, HAND_SHAKED};

/// Progress of the auto-baud sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeState {
    /// Nothing sent yet.
    #[default]
    Idle,
    /// Calibrating, no confirmation pending.
    AwaitingFirstConfirm,
    /// One confirmation seen, the next byte decides.
    AwaitingSecondConfirm,
    /// Baud rate agreed, command traffic allowed.
    Locked,
}

impl HandshakeState {
    #[inline]
    pub const fn is_locked(self) -> bool {
        matches!(self, HandshakeState::Locked)
    }

    /// `HAND_SHAKED` once locked, for hosts that persist link status
    /// across their own resets.
    pub const fn status_byte(self) -> Option<u8> {
        match self {
            HandshakeState::Locked => Some(HAND_SHAKED),
            _ => None,
        }
    }
}

/// What the driver has to do after feeding a received byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeStep {
    /// Send this byte and keep listening.
    Transmit(u8),
    /// Two consecutive confirmations: stop.
    Locked,
}

/// Auto-baud engine. Plain value, no I/O.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoBaud {
    state: HandshakeState,
}

impl AutoBaud {
    pub const fn new() -> Self {
        AutoBaud {
            state: HandshakeState::Idle,
        }
    }

    /// An engine that is already locked, for links calibrated earlier.
    pub const fn locked() -> Self {
        AutoBaud {
            state: HandshakeState::Locked,
        }
    }

    #[inline]
    pub const fn state(&self) -> HandshakeState {
        self.state
    }

    /// Begins (or restarts) calibration. Returns the first byte to transmit.
    pub fn start(&mut self) -> u8 {
        self.state = HandshakeState::AwaitingFirstConfirm;
        CAL_BYTE
    }

    /// Feeds one received byte.
    ///
    /// A confirmation advances, a second consecutive one locks. Anything
    /// else drops all progress. Once locked the engine stays locked until
    /// [`reset`](Self::reset).
    pub fn on_byte(&mut self, byte: u8) -> HandshakeStep {
        let confirmed = byte == CONFIRM;
        self.state = match (self.state, confirmed) {
            (HandshakeState::Locked, _) => HandshakeState::Locked,
            (HandshakeState::AwaitingSecondConfirm, true) => HandshakeState::Locked,
            (_, true) => HandshakeState::AwaitingSecondConfirm,
            (_, false) => HandshakeState::AwaitingFirstConfirm,
        };

        if self.state.is_locked() {
            HandshakeStep::Locked
        } else {
            HandshakeStep::Transmit(CAL_BYTE)
        }
    }

    pub fn reset(&mut self) {
        self.state = HandshakeState::Idle;
    }
}
