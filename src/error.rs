use core::fmt;

/// Peripheral a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peripheral {
    Adc,
    TemperatureSensor,
    Serial,
    Led,
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Peripheral::Adc => "ADC",
            Peripheral::TemperatureSensor => "temperature sensor",
            Peripheral::Serial => "debug UART",
            Peripheral::Led => "LED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ADC never signalled conversion complete within the timeout.
    SensorTimeout,
    /// A peripheral refused its one-time setup.
    PeripheralInitFailure(Peripheral),
    /// A read or write on an initialized peripheral failed.
    IoFailure(Peripheral),
    /// The destination buffer cannot hold the formatted text and its terminator.
    BufferTooSmall { needed: usize, available: usize },
    /// NaN, infinite, or too large in magnitude to format.
    ValueOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SensorTimeout => f.write_str("timed out waiting for ADC conversion"),
            Error::PeripheralInitFailure(p) => write!(f, "failed to initialise {}", p),
            Error::IoFailure(p) => write!(f, "I/O failure on {}", p),
            Error::BufferTooSmall { needed, available } => write!(
                f,
                "buffer too small: need {} bytes, have {}",
                needed, available
            ),
            Error::ValueOutOfRange => f.write_str("value cannot be formatted"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
