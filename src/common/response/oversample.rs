// src/common/response/oversample.rs

use super::{error::OversampleError, packet::decode_packet, reading::Reading};

/// Running accumulator for oversampled readings.
///
/// Failed readings are counted as attempts but contribute nothing to the
/// mean. The result carries the channel and echo of the last *successful*
/// reading, never those of a failed one.
///
/// Counters are wide enough for any realistic run. Once the sum or the
/// entry count would overflow, further readings are still counted as
/// attempts but no longer change the mean.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Oversampler {
    sum: u64,
    entries: u32,
    attempts: u32,
    last_valid: Option<Reading>,
}

impl Oversampler {
    pub const fn new() -> Self {
        Oversampler {
            sum: 0,
            entries: 0,
            attempts: 0,
            last_valid: None,
        }
    }

    /// Adds one reading. Returns `true` if it was counted toward the mean.
    pub fn push(&mut self, reading: Reading) -> bool {
        self.attempts = self.attempts.saturating_add(1);
        if reading.is_failed() {
            return false;
        }
        match (
            self.sum.checked_add(u64::from(reading.sample())),
            self.entries.checked_add(1),
        ) {
            (Some(sum), Some(entries)) => {
                self.sum = sum;
                self.entries = entries;
                self.last_valid = Some(reading);
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Number of readings that passed validation.
    #[inline]
    pub const fn entries(&self) -> u32 {
        self.entries
    }

    /// Integer mean of the successful samples.
    pub fn finish(&self) -> Result<Reading, OversampleError> {
        match self.last_valid {
            Some(last) if self.entries > 0 => {
                // Every sample fits in a u16, so their mean does too
                let mean = self.sum / u64::from(self.entries);
                let mean = u16::try_from(mean).unwrap_or(u16::MAX);
                Ok(Reading::new(last.command_echo(), last.channel(), mean))
            }
            _ => Err(OversampleError::AllSamplesFailed {
                attempted: self.attempts,
            }),
        }
    }
}

/// Decodes `buffer` `sample_count` times and averages the valid samples.
///
/// The buffer is not refilled here; a caller doing physical reads refills it
/// between calls, or feeds an [`Oversampler`] directly.
pub fn oversample(
    buffer: &[u8],
    expected_echo: u8,
    sample_count: u8,
) -> Result<Reading, OversampleError> {
    let mut acc = Oversampler::new();
    for _ in 0..sample_count {
        acc.push(decode_packet(buffer, expected_echo));
    }
    acc.finish()
}
