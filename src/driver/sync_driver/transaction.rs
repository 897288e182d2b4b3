// src/driver/sync_driver/transaction.rs

use super::SyncDriver;
use crate::common::{
    command::CommandByte,
    error::Si8900Error,
    frame::{FAILED, PACKET_LEN},
    hal_traits::{Si8900Serial, Si8900Timer},
    response::{decode_packet_checked, Oversampler, Reading, ResponsePacket},
};

impl<IF> SyncDriver<IF>
where
    IF: Si8900Serial + Si8900Timer,
{
    /// Sends `cmd` and waits for the sensor to echo it back.
    ///
    /// A wrong echo triggers a retransmission, up to `echo_max_attempts`
    /// transmissions in total. Before each retransmission the receive line is
    /// drained, so data bytes that followed a garbled echo are not mistaken
    /// for the next one. On success the echo byte of the response has been
    /// consumed and the two data bytes are next on the wire.
    pub fn send_command(&mut self, cmd: CommandByte) -> Result<(), Si8900Error<IF::Error>> {
        self.ensure_locked()?;

        let sent = cmd.as_u8();
        let attempts = self.config.echo_max_attempts.max(1);
        let mut received = FAILED;

        for attempt in 1..=attempts {
            self.transmit_byte(sent)?;
            received = self.receive_byte()?;
            if received == sent {
                return Ok(());
            }
            #[cfg(feature = "log")]
            log::debug!(
                "si8900: echo {:#04x} does not match command {:#04x} (attempt {})",
                received,
                sent,
                attempt
            );
            if attempt < attempts {
                self.drain_rx()?;
            }
        }

        Err(Si8900Error::CommandEchoMismatch {
            sent,
            received,
            attempts,
        })
    }

    /// One command/response exchange: send `cmd`, then read its two data bytes.
    pub fn acquire(&mut self, cmd: CommandByte) -> Result<Reading, Si8900Error<IF::Error>> {
        self.send_command(cmd)?;

        let high = self.receive_byte()?;
        let low = self.receive_byte()?;
        // send_command already matched the echo
        Ok(ResponsePacket::new([cmd.as_u8(), high, low]).decode(cmd.as_u8()))
    }

    /// Fills `buffer` with one full 3-byte response straight off the wire.
    ///
    /// No command is sent. This is how packets arrive after a streaming
    /// command: the first one through [`acquire`](Self::acquire), the rest here.
    pub fn receive_packet(&mut self, buffer: &mut [u8]) -> Result<(), Si8900Error<IF::Error>> {
        self.ensure_locked()?;

        if buffer.len() < PACKET_LEN {
            return Err(Si8900Error::BufferTooShort {
                needed: PACKET_LEN,
                got: buffer.len(),
            });
        }
        for slot in buffer[..PACKET_LEN].iter_mut() {
            *slot = self.receive_byte()?;
        }
        Ok(())
    }

    /// Receives one packet and validates it against `expected`.
    pub fn read_packet(&mut self, expected: CommandByte) -> Result<Reading, Si8900Error<IF::Error>> {
        let mut buffer = [0u8; PACKET_LEN];
        self.receive_packet(&mut buffer)?;
        decode_packet_checked(&buffer, expected.as_u8()).map_err(|e| {
            #[cfg(feature = "log")]
            log::warn!("si8900: dropped packet {:02x?}", buffer);
            Si8900Error::from(e)
        })
    }

    /// Averages `sample_count` single exchanges of `cmd`.
    ///
    /// Transport errors abort the whole run.
    pub fn acquire_oversampled(
        &mut self,
        cmd: CommandByte,
        sample_count: u8,
    ) -> Result<Reading, Si8900Error<IF::Error>> {
        self.oversample_with(cmd, sample_count, |driver, cmd| driver.acquire(cmd))
    }

    /// Averages `sample_count` packets of an already running stream.
    ///
    /// Packets whose echo does not match are counted as failed samples;
    /// other errors abort the run.
    pub fn read_oversampled(
        &mut self,
        expected: CommandByte,
        sample_count: u8,
    ) -> Result<Reading, Si8900Error<IF::Error>> {
        self.oversample_with(expected, sample_count, |driver, cmd| driver.read_packet(cmd))
    }

    fn oversample_with<F>(
        &mut self,
        cmd: CommandByte,
        sample_count: u8,
        mut read: F,
    ) -> Result<Reading, Si8900Error<IF::Error>>
    where
        F: FnMut(&mut Self, CommandByte) -> Result<Reading, Si8900Error<IF::Error>>,
    {
        let mut acc = Oversampler::new();
        for _ in 0..sample_count {
            match read(&mut *self, cmd) {
                Ok(reading) => {
                    acc.push(reading);
                }
                Err(Si8900Error::PacketValidationFailed { received, .. }) => {
                    acc.push(Reading::failed(received));
                }
                Err(e) => return Err(e),
            }
        }
        acc.finish().map_err(Si8900Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{
        command::{Channel, Gain, Mode, Reference},
        config::DriverConfig,
        frame::CONFIRM,
    };
    use crate::driver::mock::{MockCommError, MockInterface};

    fn locked_driver(mock: MockInterface) -> SyncDriver<MockInterface> {
        let mut driver = SyncDriver::new(mock);
        driver.assume_locked();
        driver
    }

    fn stage_response(mock: &mut MockInterface, cmd: CommandByte, sample: u16) {
        let packet = ResponsePacket::encode(cmd.as_u8(), cmd.channel().index(), sample);
        mock.stage_read_data(packet.as_bytes());
    }

    #[test]
    fn test_send_command_requires_lock() {
        let mut driver = SyncDriver::new(MockInterface::new());
        assert_eq!(
            driver.send_command(CommandByte::GP_SINGLE_READ_0),
            Err(Si8900Error::NotCalibrated)
        );
        assert!(driver.interface.written().is_empty());
    }

    #[test]
    fn test_send_command_echo_ok() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0xC2]);
        let mut driver = locked_driver(mock);

        assert_eq!(driver.send_command(CommandByte::GP_SINGLE_READ_0), Ok(()));
        assert_eq!(driver.interface.written(), &[0xC2]);
    }

    #[test]
    fn test_send_command_retries_until_echo() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0x00]);
        mock.stage_quiet_line();
        mock.stage_read_data(&[0xD2]);
        mock.stage_quiet_line();
        mock.stage_read_data(&[0xC2]);
        let mut driver = locked_driver(mock);

        assert_eq!(driver.send_command(CommandByte::GP_SINGLE_READ_0), Ok(()));
        assert_eq!(driver.interface.written(), &[0xC2, 0xC2, 0xC2]);
    }

    #[test]
    fn test_send_command_gives_up() {
        let mut mock = MockInterface::new();
        for byte in [0x00, 0x01] {
            mock.stage_read_data(&[byte]);
            mock.stage_quiet_line();
        }
        mock.stage_read_data(&[0x02, 0x03]);
        let config = DriverConfig::new().with_echo_max_attempts(3);
        let mut driver = SyncDriver::with_config(mock, config);
        driver.assume_locked();

        assert_eq!(
            driver.send_command(CommandByte::GP_SINGLE_READ_1),
            Err(Si8900Error::CommandEchoMismatch {
                sent: 0xD2,
                received: 0x02,
                attempts: 3
            })
        );
        assert_eq!(driver.interface.written().len(), 3);
        // Nothing is drained after the last attempt
        assert_eq!(driver.interface.read_queue.len(), 1);
    }

    #[test]
    fn test_send_command_drains_before_retransmit() {
        let cmd = CommandByte::GP_SINGLE_READ_0;
        let mut mock = MockInterface::new();
        // Garbled echo, still followed by the two data bytes of its response
        mock.stage_read_data(&[0x00, 0x80, 0x10]);
        mock.stage_quiet_line();
        stage_response(&mut mock, cmd, 300);
        let mut driver = locked_driver(mock);

        let reading = driver.acquire(cmd).unwrap();
        assert_eq!(reading.sample(), 300);
        assert_eq!(driver.interface.written(), &[0xC2, 0xC2]);
        assert!(driver.interface.read_queue.is_empty());
    }

    #[test]
    fn test_send_command_silent_sensor() {
        let mut driver = locked_driver(MockInterface::new());
        assert_eq!(
            driver.send_command(CommandByte::GP_SINGLE_READ_0),
            Err(Si8900Error::Timeout)
        );
    }

    #[test]
    fn test_acquire_decodes_reading() {
        let cmd = CommandByte::new(Gain::Unity, Mode::SingleShot, Reference::External, Channel::Ch1);
        let mut mock = MockInterface::new();
        stage_response(&mut mock, cmd, 777);
        let mut driver = locked_driver(mock);

        let reading = driver.acquire(cmd).unwrap();
        assert_eq!(reading.command_echo(), cmd.as_u8());
        assert_eq!(reading.channel_id(), Some(Channel::Ch1));
        assert_eq!(reading.sample(), 777);
        assert!(driver.interface.read_queue.is_empty());
    }

    #[test]
    fn test_acquire_canonical_data_bytes() {
        // Same data bytes as the 0xCD fixture, behind a well-formed echo
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0xC2, 0x9A, 0x3C]);
        let mut driver = locked_driver(mock);

        let reading = driver.acquire(CommandByte::GP_SINGLE_READ_0).unwrap();
        assert_eq!(reading.channel(), 1);
        assert_eq!(reading.sample(), 670);
    }

    #[test]
    fn test_acquire_truncated_response() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0xC2, 0x80]);
        let mut driver = locked_driver(mock);
        assert_eq!(
            driver.acquire(CommandByte::GP_SINGLE_READ_0),
            Err(Si8900Error::Timeout)
        );
    }

    #[test]
    fn test_receive_packet_into_caller_buffer() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0xE2, 0xAF, 0x7E]);
        let mut driver = locked_driver(mock);

        let mut buffer = [0u8; 4];
        driver.receive_packet(&mut buffer).unwrap();
        assert_eq!(buffer, [0xE2, 0xAF, 0x7E, 0x00]);

        let mut small = [0u8; 2];
        assert_eq!(
            driver.receive_packet(&mut small),
            Err(Si8900Error::BufferTooShort { needed: 3, got: 2 })
        );
    }

    #[test]
    fn test_read_packet_rejects_wrong_echo() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0xD2, 0x9A, 0x3C]);
        let mut driver = locked_driver(mock);
        assert_eq!(
            driver.read_packet(CommandByte::GP_SINGLE_READ_0),
            Err(Si8900Error::PacketValidationFailed {
                expected: 0xC2,
                received: 0xD2
            })
        );
    }

    #[test]
    fn test_acquire_oversampled_mean() {
        let cmd = CommandByte::GP_SINGLE_READ_2;
        let mut mock = MockInterface::new();
        for sample in [100, 101, 103, 104] {
            stage_response(&mut mock, cmd, sample);
        }
        let mut driver = locked_driver(mock);

        let reading = driver.acquire_oversampled(cmd, 4).unwrap();
        assert_eq!(reading.sample(), 102);
        assert_eq!(reading.channel(), 2);
        assert_eq!(driver.interface.written(), &[0xE2; 4]);
    }

    #[test]
    fn test_acquire_oversampled_zero_count() {
        let mut driver = locked_driver(MockInterface::new());
        assert_eq!(
            driver.acquire_oversampled(CommandByte::GP_SINGLE_READ_0, 0),
            Err(Si8900Error::AllSamplesFailed { attempted: 0 })
        );
    }

    #[test]
    fn test_read_oversampled_skips_bad_packets() {
        let cmd = CommandByte::GP_SINGLE_READ_0;
        let mut mock = MockInterface::new();
        stage_response(&mut mock, cmd, 10);
        mock.stage_read_data(&[0x00, 0x80, 0x00]);
        stage_response(&mut mock, cmd, 20);
        let mut driver = locked_driver(mock);

        let reading = driver.read_oversampled(cmd, 3).unwrap();
        assert_eq!(reading.sample(), 15);
        assert_eq!(reading.command_echo(), 0xC2);
    }

    #[test]
    fn test_read_oversampled_all_failed() {
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0x00, 0x80, 0x00, 0x01, 0x80, 0x00]);
        let mut driver = locked_driver(mock);
        assert_eq!(
            driver.read_oversampled(CommandByte::GP_SINGLE_READ_0, 2),
            Err(Si8900Error::AllSamplesFailed { attempted: 2 })
        );
    }

    #[test]
    fn test_write_error_propagates() {
        let mut mock = MockInterface::new();
        mock.fail_writes = true;
        let mut driver = locked_driver(mock);
        assert_eq!(
            driver.acquire(CommandByte::GP_SINGLE_READ_0),
            Err(Si8900Error::Io(MockCommError))
        );
    }

    #[test]
    fn test_handshake_then_acquire() {
        let cmd = CommandByte::GP_SINGLE_READ_1;
        let mut mock = MockInterface::new();
        mock.stage_read_data(&[0x12, CONFIRM, CONFIRM]);
        mock.stage_quiet_line();
        stage_response(&mut mock, cmd, 512);
        let mut driver = SyncDriver::new(mock);

        driver.handshake().unwrap();
        let reading = driver.acquire(cmd).unwrap();
        assert_eq!(reading.sample(), 512);
        assert_eq!(driver.interface.written(), &[0xAA, 0xAA, 0xAA, 0xD2]);
    }
}
