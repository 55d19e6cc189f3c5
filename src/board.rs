//! The IO1X board context.
//!
//! All peripheral handles live in one [`IoSensorBoard`], built once by
//! [`IoSensorBoard::init`]. Operations borrow it mutably, so there is no
//! module level state apart from the [`ConversionFlag`] the ADC interrupt
//! writes to.

use core::fmt::Debug;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use heapless::String;
use log::{debug, trace, warn};

use crate::adc::ConversionAdc;
use crate::config::Config;
use crate::conversion::{wait_for_conversion, ConversionFlag};
use crate::error::{Error, Peripheral, Result};
use crate::led::Led;
use crate::quantities;
use crate::telemetry::{self, Reading};
use crate::temperature::TemperatureSensor;
use crate::uart::DebugUart;

const TELEMETRY_LINE_CAPACITY: usize = 96;

/// Peripherals handed to [`IoSensorBoard::init`], already set up at the HAL
/// level (clocks, pin muxing, bus enabled).
pub struct BoardParts<ADC, TEMP, SERIAL, LED, DELAY> {
    pub adc: ADC,
    pub temperature: TEMP,
    pub serial: SERIAL,
    pub led: LED,
    pub delay: DELAY,
}

pub struct IoSensorBoard<'f, ADC, TEMP, SERIAL, LED, DELAY> {
    adc: ADC,
    temperature: TEMP,
    uart: DebugUart<SERIAL>,
    led: Led<LED>,
    delay: DELAY,
    flag: &'f ConversionFlag,
    config: Config,
}

fn init_failure<E: Debug>(peripheral: Peripheral, err: E) -> Error {
    warn!("{} init failed: {:?}", peripheral, err);
    Error::PeripheralInitFailure(peripheral)
}

fn io_failure<E: Debug>(peripheral: Peripheral, err: E) -> Error {
    warn!("{} I/O failed: {:?}", peripheral, err);
    Error::IoFailure(peripheral)
}

impl<'f, ADC, TEMP, SERIAL, LED, DELAY> IoSensorBoard<'f, ADC, TEMP, SERIAL, LED, DELAY>
where
    ADC: ConversionAdc,
    TEMP: TemperatureSensor,
    SERIAL: serial::Write<u8>,
    SERIAL::Error: Debug,
    LED: OutputPin,
    LED::Error: Debug,
    DELAY: DelayUs<u32>,
{
    /// One-time bring up: enables the light sensor channel, starts the first
    /// conversion and configures the temperature sensor resolution.
    ///
    /// `flag` must be the flag the ADC completion interrupt signals.
    pub fn init(
        parts: BoardParts<ADC, TEMP, SERIAL, LED, DELAY>,
        config: Config,
        flag: &'f ConversionFlag,
    ) -> Result<Self> {
        let BoardParts {
            mut adc,
            mut temperature,
            serial,
            led,
            delay,
        } = parts;

        flag.clear();
        adc.enable_channel()
            .map_err(|e| init_failure(Peripheral::Adc, e))?;
        adc.start_conversion()
            .map_err(|e| init_failure(Peripheral::Adc, e))?;
        debug!("light sensor ADC enabled");

        temperature
            .configure(config.temperature_resolution)
            .map_err(|e| init_failure(Peripheral::TemperatureSensor, e))?;
        debug!(
            "temperature sensor configured, {:?}",
            config.temperature_resolution
        );

        Ok(Self {
            adc,
            temperature,
            uart: DebugUart::new(serial),
            led: Led::new(led, config.led_active_low),
            delay,
            flag,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converts the light sensor input and returns it in volts.
    pub fn read_voltage(&mut self) -> Result<f32> {
        self.flag.clear();
        self.adc
            .start_conversion()
            .map_err(|e| io_failure(Peripheral::Adc, e))?;
        wait_for_conversion(
            self.flag,
            &mut self.delay,
            self.config.conversion_timeout_us,
            self.config.poll_interval_us,
        )?;
        let sample = self
            .adc
            .read_sample()
            .map_err(|e| io_failure(Peripheral::Adc, e))?;
        trace!("light sensor sample {}", sample);
        Ok(quantities::voltage_from_sample(sample, &self.config))
    }

    pub fn read_current(&self, voltage: f32) -> f32 {
        quantities::current_from_voltage(voltage, &self.config)
    }

    pub fn read_illuminance(&self, current: f32) -> f32 {
        quantities::illuminance_from_current(current, &self.config)
    }

    /// Temperature in whole degrees Celsius.
    ///
    /// The fraction is truncated and the value narrowed with wrap-around,
    /// so -1 °C reads as 65535.
    pub fn read_temperature(&mut self) -> Result<u16> {
        let celsius = self
            .temperature
            .read_celsius()
            .map_err(|e| io_failure(Peripheral::TemperatureSensor, e))?;
        Ok(celsius as i32 as u16)
    }

    pub fn led_on(&mut self) -> Result<()> {
        self.led.on().map_err(|e| io_failure(Peripheral::Led, e))
    }

    pub fn led_off(&mut self) -> Result<()> {
        self.led.off().map_err(|e| io_failure(Peripheral::Led, e))
    }

    pub fn send_byte(&mut self, byte: u8) -> Result<()> {
        self.uart
            .send_byte(byte)
            .map_err(|e| io_failure(Peripheral::Serial, e))
    }

    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.uart
            .send_bytes(bytes)
            .map_err(|e| io_failure(Peripheral::Serial, e))
    }

    pub fn send_str(&mut self, text: &str) -> Result<()> {
        self.send_bytes(text.as_bytes())
    }

    /// Runs voltage → current → illuminance, then reads the temperature.
    pub fn sample(&mut self) -> Result<Reading> {
        let voltage = self.read_voltage()?;
        let current = self.read_current(voltage);
        let illuminance = self.read_illuminance(current);
        let temperature = self.read_temperature()?;
        Ok(Reading {
            voltage,
            current,
            illuminance,
            temperature,
        })
    }

    /// Sends `reading` as one telemetry line.
    pub fn send_reading(&mut self, reading: &Reading) -> Result<()> {
        let mut line: String<TELEMETRY_LINE_CAPACITY> = String::new();
        telemetry::render(reading, self.config.telemetry_precision, &mut line)?;
        self.send_str(&line)
    }

    pub fn release(self) -> BoardParts<ADC, TEMP, SERIAL, LED, DELAY> {
        BoardParts {
            adc: self.adc,
            temperature: self.temperature,
            serial: self.uart.release(),
            led: self.led.release(),
            delay: self.delay,
        }
    }
}
