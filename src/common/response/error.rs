// src/common/response/error.rs

use core::fmt;

/// Error type specific to response packet validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Input buffer holds fewer bytes than a full packet.
    TooShort { needed: usize, got: usize },
    /// Byte 0 is not the command byte that was sent.
    EchoMismatch { expected: u8, received: u8 },
}

/// Error type specific to oversampled aggregation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OversampleError {
    /// No reading passed validation, so there is nothing to average.
    AllSamplesFailed { attempted: u32 },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::TooShort { needed, got } => {
                write!(f, "Packet too short: needed {} bytes, got {}", needed, got)
            }
            PacketError::EchoMismatch { expected, received } => write!(
                f,
                "Echo mismatch: expected {:#04x}, received {:#04x}",
                expected, received
            ),
        }
    }
}

impl fmt::Display for OversampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OversampleError::AllSamplesFailed { attempted } => {
                write!(f, "All {} samples failed validation", attempted)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {}

#[cfg(feature = "std")]
impl std::error::Error for OversampleError {}
