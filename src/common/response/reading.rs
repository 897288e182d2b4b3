// src/common/response/reading.rs

use crate::common::{command::Channel, conversion::VoltageScale, frame::FAILED};

/// A decoded sensor reading.
///
/// Immutable once built. A failed decode carries the `FAILED` sentinel in
/// both `channel` and `sample`; check [`Reading::is_failed`] rather than
/// either field alone, since `0xFF` is also a legal 10-bit sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    command_echo: u8,
    channel: u8,
    sample: u16,
}

impl Reading {
    pub const FAILED_CHANNEL: u8 = FAILED;
    pub const FAILED_SAMPLE: u16 = FAILED as u16;

    pub const fn new(command_echo: u8, channel: u8, sample: u16) -> Self {
        Reading {
            command_echo,
            channel,
            sample,
        }
    }

    /// A reading carrying the failure sentinel.
    pub const fn failed(command_echo: u8) -> Self {
        Reading {
            command_echo,
            channel: Self::FAILED_CHANNEL,
            sample: Self::FAILED_SAMPLE,
        }
    }

    #[inline]
    pub const fn command_echo(&self) -> u8 {
        self.command_echo
    }

    /// Raw channel bits (0-3), or `FAILED_CHANNEL`.
    #[inline]
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Raw 10-bit sample, or `FAILED_SAMPLE`.
    #[inline]
    pub const fn sample(&self) -> u16 {
        self.sample
    }

    #[inline]
    pub const fn is_failed(&self) -> bool {
        self.channel == Self::FAILED_CHANNEL && self.sample == Self::FAILED_SAMPLE
    }

    /// The channel as a typed value. `None` when failed or for channel bits `11`.
    pub const fn channel_id(&self) -> Option<Channel> {
        if self.is_failed() {
            None
        } else {
            Channel::from_index(self.channel)
        }
    }

    /// Converts the sample to mains volts with `scale`. `None` when failed.
    pub fn to_volts(&self, scale: &VoltageScale) -> Option<f32> {
        if self.is_failed() {
            None
        } else {
            Some(scale.sample_to_volts(self.sample))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::conversion::MainsProfile;

    #[test]
    fn test_failed_reading() {
        let r = Reading::failed(0xC2);
        assert!(r.is_failed());
        assert_eq!(r.command_echo(), 0xC2);
        assert_eq!(r.channel(), 0xFF);
        assert_eq!(r.sample(), 0x00FF);
        assert_eq!(r.channel_id(), None);
        assert_eq!(r.to_volts(&VoltageScale::default()), None);
    }

    #[test]
    fn test_sample_of_255_is_not_a_failure() {
        let r = Reading::new(0xC2, 0, 255);
        assert!(!r.is_failed());
        assert_eq!(r.channel_id(), Some(Channel::Ch0));
    }

    #[test]
    fn test_to_volts_uses_scale() {
        let r = Reading::new(0xD2, 1, 512);
        let volts = r.to_volts(&VoltageScale::new(MainsProfile::Eu)).unwrap();
        let expected = 512.0 * (3.3 / 1024.0) * (311.0 / 2.5);
        assert!((volts - expected).abs() < 1e-3);
    }

    #[test]
    fn test_channel_bits_three_has_no_channel_id() {
        let r = Reading::new(0xC2, 3, 10);
        assert!(!r.is_failed());
        assert_eq!(r.channel_id(), None);
    }
}
