// src/common/response/packet.rs

use super::{error::PacketError, reading::Reading};
use crate::common::frame::{
    CHANNEL_MASK, CHANNEL_SHIFT, DATA_HIGH_MARKER, PACKET_LEN, SAMPLE_HIGH_MASK, SAMPLE_MAX,
};

/// The three raw bytes of a sensor response: command echo, then two data bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResponsePacket([u8; PACKET_LEN]);

impl ResponsePacket {
    pub const fn new(bytes: [u8; PACKET_LEN]) -> Self {
        ResponsePacket(bytes)
    }

    /// Copies the first three bytes of `buffer`. Extra bytes are ignored.
    pub fn from_slice(buffer: &[u8]) -> Result<Self, PacketError> {
        match buffer.get(..PACKET_LEN) {
            Some(&[echo, high, low]) => Ok(ResponsePacket([echo, high, low])),
            _ => Err(PacketError::TooShort {
                needed: PACKET_LEN,
                got: buffer.len(),
            }),
        }
    }

    /// Builds a conforming packet for `channel` (0-3) and a 10-bit `sample`.
    /// Out of range bits are masked off.
    pub const fn encode(command_echo: u8, channel: u8, sample: u16) -> Self {
        let sample = sample & SAMPLE_MAX;
        let high = DATA_HIGH_MARKER
            | ((channel << CHANNEL_SHIFT) & CHANNEL_MASK)
            | ((sample >> 6) as u8 & SAMPLE_HIGH_MASK);
        let low = ((sample & 0x3F) as u8) << 1;
        ResponsePacket([command_echo, high, low])
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }

    #[inline]
    pub const fn echo(&self) -> u8 {
        self.0[0]
    }

    /// Data bytes joined as `(byte1 << 7) | byte2`, which yields
    /// `1 0 INCH{2} D9..D0 0` in the low 14 bits.
    #[inline]
    pub const fn data_word(&self) -> u16 {
        ((self.0[1] as u16) << 7) | self.0[2] as u16
    }

    /// Channel bits 5:4 of data byte 1.
    #[inline]
    pub const fn channel_bits(&self) -> u8 {
        (self.0[1] & CHANNEL_MASK) >> CHANNEL_SHIFT
    }

    /// The 10-bit sample sitting one bit above the LSB of the data word.
    #[inline]
    pub const fn sample_bits(&self) -> u16 {
        (self.data_word() >> 1) & SAMPLE_MAX
    }

    /// Decodes against `expected_echo`; a mismatched echo yields a failed reading.
    /// Data bytes are not checked for their framing bits.
    pub const fn decode(&self, expected_echo: u8) -> Reading {
        if self.echo() != expected_echo {
            return Reading::failed(self.echo());
        }
        Reading::new(self.echo(), self.channel_bits(), self.sample_bits())
    }

    /// Like [`decode`](Self::decode) but reports a mismatched echo as an error.
    pub const fn decode_checked(&self, expected_echo: u8) -> Result<Reading, PacketError> {
        if self.echo() != expected_echo {
            return Err(PacketError::EchoMismatch {
                expected: expected_echo,
                received: self.echo(),
            });
        }
        Ok(Reading::new(self.echo(), self.channel_bits(), self.sample_bits()))
    }
}

impl From<[u8; PACKET_LEN]> for ResponsePacket {
    fn from(bytes: [u8; PACKET_LEN]) -> Self {
        ResponsePacket(bytes)
    }
}

/// Decodes the first three bytes of `buffer` into a [`Reading`].
///
/// Returns a reading carrying the `FAILED` sentinel when byte 0 is not
/// `expected_echo`, or when the buffer is too short to hold a packet.
pub fn decode_packet(buffer: &[u8], expected_echo: u8) -> Reading {
    match ResponsePacket::from_slice(buffer) {
        Ok(packet) => packet.decode(expected_echo),
        Err(_) => Reading::failed(buffer.first().copied().unwrap_or(0)),
    }
}

/// Checked variant of [`decode_packet`]: failures come back as a [`PacketError`].
pub fn decode_packet_checked(buffer: &[u8], expected_echo: u8) -> Result<Reading, PacketError> {
    ResponsePacket::from_slice(buffer)?.decode_checked(expected_echo)
}
