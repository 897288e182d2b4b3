// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod bits;
pub mod command;
pub mod config;
pub mod conversion;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod hal_traits;
pub mod response;
pub mod timing;

#[cfg(feature = "impl-native")]
pub mod native;

// --- Re-export key types/traits/functions for easier access ---

// From bits.rs
pub use bits::bit_reverse;

// From command.rs
pub use command::{encode_command, Channel, CommandByte, Gain, Mode, Reference};

// From config.rs
pub use config::DriverConfig;

// From conversion.rs
pub use conversion::{MainsProfile, VoltageScale};

// From error.rs
pub use error::Si8900Error;

// From handshake.rs
pub use handshake::{AutoBaud, HandshakeState, HandshakeStep};

// From hal_traits.rs
pub use hal_traits::{Si8900Instant, Si8900Serial, Si8900Timer};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{
    decode_packet, decode_packet_checked, oversample, OversampleError, Oversampler, PacketError,
    Reading, ResponsePacket,
};

// Frame constants stay namespaced: users reach them via common::frame::*

#[cfg(feature = "impl-native")]
pub use native::NativeAdapter;
