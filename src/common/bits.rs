// src/common/bits.rs

/// Reverses the bit order of a 16-bit word across its full width.
///
/// Useful for converting between MSB-first and LSB-first views of a packet.
/// `bit_reverse(0x0001) == 0x8000`.
#[inline]
pub const fn bit_reverse(num: u16) -> u16 {
    num.reverse_bits()
}
