//! Debug UART transmitter.

use embedded_hal::serial::Write;

/// Blocking writer over the debug serial port.
pub struct DebugUart<S> {
    serial: S,
}

impl<S: Write<u8>> DebugUart<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Sends exactly one byte, blocking until the transmitter accepts it.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), S::Error> {
        nb::block!(self.serial.write(byte))
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), S::Error> {
        for byte in bytes {
            self.send_byte(*byte)?;
        }
        Ok(())
    }

    pub fn release(self) -> S {
        self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh0::serial::{Mock as SerialMock, Transaction as SerialTransaction};
    use embedded_hal_mock::eh0::MockError;
    use std::io::ErrorKind;

    #[test]
    fn sends_single_byte() {
        let expectations = [SerialTransaction::write(b'A')];
        let mut uart = DebugUart::new(SerialMock::new(&expectations));
        uart.send_byte(b'A').unwrap();
        uart.release().done();
    }

    #[test]
    fn sends_bytes_in_order() {
        let expectations = [SerialTransaction::write_many(b"lux\n")];
        let mut uart = DebugUart::new(SerialMock::new(&expectations));
        uart.send_bytes(b"lux\n").unwrap();
        uart.release().done();
    }

    #[test]
    fn stops_at_the_first_failed_byte() {
        let expectations = [
            SerialTransaction::write(b'o'),
            SerialTransaction::write_error(
                b'k',
                nb::Error::Other(MockError::Io(ErrorKind::BrokenPipe)),
            ),
        ];
        let mut uart = DebugUart::new(SerialMock::new(&expectations));
        assert!(uart.send_bytes(b"ok!").is_err());
        uart.release().done();
    }
}
