// src/common/response/mod.rs

// Declare the sub-modules within the response directory
mod error;
mod oversample;
mod packet;
mod reading;

// Re-export public types
pub use error::{OversampleError, PacketError};
pub use oversample::{oversample, Oversampler};
pub use packet::{decode_packet, decode_packet_checked, ResponsePacket};
pub use reading::Reading;
