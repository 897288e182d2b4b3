//! Si8900 command byte definitions.
//!
//! A command byte is built from four independent fields, one value each:
//!
//! ```text
//! packet:      1 1 INCH{2} VREF - MODE PGA
//! bit order:   7 6   54     3   2  1    0
//! ```

use core::convert::TryFrom;
use core::fmt;

use super::{
    frame::{CHANNEL_MASK, CHANNEL_SHIFT, COMMAND_MARKER, MARKER_MASK, RESERVED_BIT},
    Si8900Error,
};

/// Programmable gain (PGA, bit 0).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    /// Gain of 0.5.
    Half = 0x00,
    /// Gain of 1.
    Unity = 0x01,
}

/// ADC conversion mode (bit 1).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// One conversion per command.
    SingleShot = 0x00,
    /// Sensor keeps sending packets after the command.
    Streaming = 0x02,
}

/// Voltage reference (bit 3).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Reference {
    /// Reference is the supply voltage (VDD).
    Vdd = 0x00,
    /// Reference is the external VREF pin.
    External = 0x08,
}

/// Input channel (bits 5:4), carrying the `11` framing marker in bits 7:6.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    Ch0 = 0xC0,
    Ch1 = 0xD0,
    Ch2 = 0xE0,
}

impl Gain {
    pub const MASK: u8 = 0x01;

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(byte: u8) -> Self {
        if byte & Self::MASK == 0 {
            Gain::Half
        } else {
            Gain::Unity
        }
    }
}

impl Mode {
    pub const MASK: u8 = 0x02;

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(byte: u8) -> Self {
        if byte & Self::MASK == 0 {
            Mode::SingleShot
        } else {
            Mode::Streaming
        }
    }
}

impl Reference {
    pub const MASK: u8 = 0x08;

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(byte: u8) -> Self {
        if byte & Self::MASK == 0 {
            Reference::Vdd
        } else {
            Reference::External
        }
    }
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Ch0, Channel::Ch1, Channel::Ch2];

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Channel number, 0 to 2.
    #[inline]
    pub const fn index(self) -> u8 {
        (self as u8 & CHANNEL_MASK) >> CHANNEL_SHIFT
    }

    /// Looks up a channel by number. Returns `None` for anything above 2.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Channel::Ch0),
            1 => Some(Channel::Ch1),
            2 => Some(Channel::Ch2),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{}", self.index())
    }
}

/// A validated Si8900 command byte.
///
/// Can only be built from the four field enums or by checked conversion
/// from a raw byte, so the `11` marker in bits 7:6 always holds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandByte(u8);

impl CommandByte {
    /// General purpose read of channel 0 (VDD ref, stream mode, gain 0.5).
    pub const GP_SINGLE_READ_0: CommandByte = CommandByte::single_read(Channel::Ch0);
    /// General purpose read of channel 1 (VDD ref, stream mode, gain 0.5).
    pub const GP_SINGLE_READ_1: CommandByte = CommandByte::single_read(Channel::Ch1);
    /// General purpose read of channel 2 (VDD ref, stream mode, gain 0.5).
    pub const GP_SINGLE_READ_2: CommandByte = CommandByte::single_read(Channel::Ch2);

    pub const fn new(gain: Gain, mode: Mode, reference: Reference, channel: Channel) -> Self {
        CommandByte(gain.bits() | mode.bits() | reference.bits() | channel.bits())
    }

    /// The preset general-purpose read for `channel`.
    ///
    /// Note the mode bit is the streaming one, matching the vendor presets.
    pub const fn single_read(channel: Channel) -> Self {
        Self::new(Gain::Half, Mode::Streaming, Reference::Vdd, channel)
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    pub const fn gain(&self) -> Gain {
        Gain::from_bits(self.0)
    }

    pub const fn mode(&self) -> Mode {
        Mode::from_bits(self.0)
    }

    pub const fn reference(&self) -> Reference {
        Reference::from_bits(self.0)
    }

    pub const fn channel(&self) -> Channel {
        match (self.0 & CHANNEL_MASK) >> CHANNEL_SHIFT {
            0 => Channel::Ch0,
            1 => Channel::Ch1,
            // 3 is rejected on construction
            _ => Channel::Ch2,
        }
    }

    /// Returns a copy with a different channel, keeping the other fields.
    pub const fn with_channel(self, channel: Channel) -> Self {
        Self::new(self.gain(), self.mode(), self.reference(), channel)
    }

    /// True if `byte` has the shape of a command byte: `11` marker, channel 0-2,
    /// reserved bit clear.
    #[inline]
    pub const fn is_valid_byte(byte: u8) -> bool {
        byte & MARKER_MASK == COMMAND_MARKER
            && (byte & CHANNEL_MASK) >> CHANNEL_SHIFT <= 2
            && byte & RESERVED_BIT == 0
    }
}

/// Combines the four fields into a command byte.
#[inline]
pub const fn encode_command(
    gain: Gain,
    mode: Mode,
    reference: Reference,
    channel: Channel,
) -> CommandByte {
    CommandByte::new(gain, mode, reference, channel)
}

impl TryFrom<u8> for CommandByte {
    // Validation cannot cause an I/O error
    type Error = Si8900Error<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if Self::is_valid_byte(value) {
            Ok(CommandByte(value))
        } else {
            Err(Si8900Error::InvalidCommandByte(value))
        }
    }
}

impl From<CommandByte> for u8 {
    fn from(value: CommandByte) -> Self {
        value.0
    }
}

impl fmt::Display for CommandByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
