//! IO1X 光センサ拡張ボードのドライバ
//!
//! Driver layer for the IO1X light sensing expansion board: an ambient light
//! sensor behind the ADC, an AT30TSE75x temperature sensor on I2C, an
//! active-low status LED and the debug UART.
//!
//! Every peripheral is reached through the `embedded-hal` 0.2 traits, so the
//! same code runs on the board and against mocks on the host.
//!
//! ```ignore
//! static FLAG: ConversionFlag = ConversionFlag::new();
//!
//! let mut board = IoSensorBoard::init(parts, Config::DEFAULT, &FLAG)?;
//! board.led_on()?;
//! let reading = board.sample()?;
//! board.send_reading(&reading)?;
//! ```
#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod board;
pub mod config;
pub mod conversion;
pub mod error;
pub mod float_fmt;
pub mod led;
pub mod logger;
pub mod quantities;
pub mod telemetry;
pub mod temperature;
pub mod uart;

pub use board::{BoardParts, IoSensorBoard};
pub use config::Config;
pub use conversion::ConversionFlag;
pub use error::{Error, Peripheral, Result};
pub use float_fmt::float_to_string;
pub use telemetry::Reading;
pub use temperature::{At30tse75x, Resolution, TemperatureSensor};
