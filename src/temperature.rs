//! AT30TSE75x digital temperature sensor (LM75 compatible register map).

use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::debug;

/// 7-bit address with A2..A0 strapped low, as on the IO1X.
pub const DEFAULT_ADDRESS: u8 = 0x48;

const REG_TEMPERATURE: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;

/// A temperature source the board can delegate to.
pub trait TemperatureSensor {
    type Error: Debug;

    fn configure(&mut self, resolution: Resolution) -> Result<(), Self::Error>;

    /// Blocking read of the current temperature in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}

/// Conversion resolution, R1:R0 in the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 0.5 °C, power-on default.
    Bits9 = 0,
    /// 0.25 °C
    Bits10 = 1,
    /// 0.125 °C
    Bits11 = 2,
    /// 0.0625 °C
    Bits12 = 3,
}

impl Resolution {
    fn config_msb(self) -> u8 {
        (self as u8) << 5
    }

    /// Bits of the temperature register that carry data at this resolution.
    fn data_mask(self) -> u16 {
        match self {
            Resolution::Bits9 => 0xff80,
            Resolution::Bits10 => 0xffc0,
            Resolution::Bits11 => 0xffe0,
            Resolution::Bits12 => 0xfff0,
        }
    }
}

pub struct At30tse75x<I2C> {
    i2c: I2C,
    address: u8,
    resolution: Resolution,
}

impl<I2C, E> At30tse75x<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Binds the driver to `i2c`. The sensor stays at its power-on
    /// configuration until [`TemperatureSensor::configure`] is called.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            resolution: Resolution::Bits9,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u16, E> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl<I2C, E> TemperatureSensor for At30tse75x<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    type Error = E;

    fn configure(&mut self, resolution: Resolution) -> Result<(), E> {
        self.i2c
            .write(self.address, &[REG_CONFIG, resolution.config_msb(), 0x00])?;
        self.resolution = resolution;
        debug!("AT30TSE75x at {:#04x}: {:?}", self.address, resolution);
        Ok(())
    }

    fn read_celsius(&mut self) -> Result<f32, E> {
        let raw = self.read_register(REG_TEMPERATURE)? & self.resolution.data_mask();
        // Two's complement, 8 fractional bits.
        Ok(f32::from(raw as i16) / 256.0)
    }
}
