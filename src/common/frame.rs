// src/common/frame.rs

//! Wire-level constants of the Si8900 UART protocol.
//!
//! Command byte:  `1 1 INCH{2} VREF - MODE PGA` (bits 7..0)
//! Data byte 1:   `1 0 INCH{2} D9..D6`
//! Data byte 2:   `0 D5..D0 0`

/// Calibration byte repeatedly sent during auto-baud.
pub const CAL_BYTE: u8 = 0xAA;
/// Sent by the sensor when it received a calibration byte correctly.
pub const CONFIRM: u8 = 0x55;
/// In-band failure sentinel.
pub const FAILED: u8 = 0xFF;
/// Status byte meaning "already handshaked", lets the host skip auto-baud.
pub const HAND_SHAKED: u8 = 0x88;

/// Length of a response packet: echo + two data bytes.
pub const PACKET_LEN: usize = 3;

/// Fixed `11` framing marker in bits 7:6 of every command byte.
pub const COMMAND_MARKER: u8 = 0xC0;
/// Mask selecting the two framing bits of a byte.
pub const MARKER_MASK: u8 = 0xC0;
/// Reserved bit 2 of the command byte, always zero.
pub const RESERVED_BIT: u8 = 0x04;

/// Fixed `10` framing marker in bits 7:6 of data byte 1.
pub const DATA_HIGH_MARKER: u8 = 0x80;
/// Channel field (bits 5:4) of the command byte and data byte 1.
pub const CHANNEL_MASK: u8 = 0x30;
pub const CHANNEL_SHIFT: u8 = 4;
/// Sample bits 9..6 carried in the low nibble of data byte 1.
pub const SAMPLE_HIGH_MASK: u8 = 0x0F;

/// Resolution of a sample.
pub const SAMPLE_BITS: u32 = 10;
/// Largest value a 10-bit sample can take.
pub const SAMPLE_MAX: u16 = (1 << SAMPLE_BITS) - 1;
