// src/lib.rs

// Tests format errors with `to_string` and run proptest, both of which need std
#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::{
    decode_packet, encode_command, oversample, CommandByte, DriverConfig, Reading,
    Si8900Error,
};
pub use driver::SyncDriver;
