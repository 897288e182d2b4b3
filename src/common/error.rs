// src/common/error.rs

use super::response::{OversampleError, PacketError};

/// Errors surfaced by the Si8900 driver and codec.
///
/// Generic over the transport's error type `E`. Codec-only operations
/// that can never touch the transport use the default `E = ()`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Si8900Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the transport implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A single bounded wait on the transport expired.
    #[error("Operation timed out")]
    Timeout,

    /// Auto-baud did not reach `Locked` within the configured budget.
    #[error("Auto-baud handshake did not lock after {attempts} calibration bytes")]
    HandshakeTimeout { attempts: u16 },

    /// Command traffic was attempted before the link was calibrated.
    #[error("Link not calibrated, run the auto-baud handshake first")]
    NotCalibrated,

    /// The sensor never echoed the command byte back.
    #[error("Command {sent:#04x} not echoed after {attempts} attempts (last byte {received:#04x})")]
    CommandEchoMismatch { sent: u8, received: u8, attempts: u8 },

    /// Byte 0 of a response packet did not match the command that was sent.
    #[error("Packet rejected: expected echo {expected:#04x}, got {received:#04x}")]
    PacketValidationFailed { expected: u8, received: u8 },

    /// Oversampling had no valid reading to average.
    #[error("All {attempted} oversampled readings failed validation")]
    AllSamplesFailed { attempted: u32 },

    /// Buffer provided was too small to hold a response packet.
    #[error("Buffer too short: needed {needed}, got {got}")]
    BufferTooShort { needed: usize, got: usize },

    /// Raw byte is not a well-formed command byte.
    #[error("Invalid command byte: {0:#04x}")]
    InvalidCommandByte(u8),
}

impl<E: core::fmt::Debug> From<PacketError> for Si8900Error<E> {
    fn from(e: PacketError) -> Self {
        match e {
            PacketError::TooShort { needed, got } => Si8900Error::BufferTooShort { needed, got },
            PacketError::EchoMismatch { expected, received } => {
                Si8900Error::PacketValidationFailed { expected, received }
            }
        }
    }
}

impl<E: core::fmt::Debug> From<OversampleError> for Si8900Error<E> {
    fn from(e: OversampleError) -> Self {
        match e {
            OversampleError::AllSamplesFailed { attempted } => {
                Si8900Error::AllSamplesFailed { attempted }
            }
        }
    }
}

// No From<E> blanket here: it would overlap the codec conversions above.
// Transport errors are wrapped explicitly with `map_err(Si8900Error::Io)`.
