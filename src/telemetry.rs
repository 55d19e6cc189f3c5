//! One pass of the sensor chain and its text form for the debug UART.

use heapless::String;

use crate::error::{Error, Result};
use crate::float_fmt::float_to_string;

const MICROAMPS_PER_AMP: f32 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Volts at the light sensor input.
    pub voltage: f32,
    /// Photocurrent in amperes.
    pub current: f32,
    /// Lux.
    pub illuminance: f32,
    /// Whole degrees Celsius, narrowed to `u16`.
    pub temperature: u16,
}

/// Renders `reading` as `V=<volts> I=<microamps> L=<lux> T=<celsius>\r\n`,
/// appending to `out`.
pub fn render<const N: usize>(
    reading: &Reading,
    precision: usize,
    out: &mut String<N>,
) -> Result<()> {
    push(out, b"V=")?;
    push_float(out, reading.voltage, precision)?;
    push(out, b" I=")?;
    push_float(out, reading.current * MICROAMPS_PER_AMP, precision)?;
    push(out, b" L=")?;
    push_float(out, reading.illuminance, precision)?;
    push(out, b" T=")?;
    let mut digits = itoa::Buffer::new();
    push(out, digits.format(reading.temperature).as_bytes())?;
    push(out, b"\r\n")
}

fn push_float<const N: usize>(out: &mut String<N>, value: f32, precision: usize) -> Result<()> {
    let mut buf = [0u8; 32];
    let len = float_to_string(value, &mut buf, precision)?;
    push(out, &buf[..len])
}

/// Appends ASCII `bytes`, all or nothing.
fn push<const N: usize>(out: &mut String<N>, bytes: &[u8]) -> Result<()> {
    let needed = out.len() + bytes.len();
    if needed > out.capacity() {
        return Err(Error::BufferTooSmall {
            needed,
            available: out.capacity(),
        });
    }
    for &byte in bytes {
        out.push(char::from(byte))
            .map_err(|_| Error::BufferTooSmall {
                needed,
                available: out.capacity(),
            })?;
    }
    Ok(())
}
