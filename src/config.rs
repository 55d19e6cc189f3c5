//! Board calibration and timing constants.

use crate::temperature::Resolution;

/// Calibration of the light sensor model plus board wiring details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Supply voltage the ADC uses as its reference, in volts.
    pub vcc_reference: f32,
    /// ADC code that corresponds to `vcc_reference` (255 for 8-bit conversions).
    pub adc_full_scale: u16,
    /// Load resistor between the phototransistor and ground, in ohms.
    pub load_resistance_ohms: f32,
    /// Phototransistor responsivity: lux per microampere of photocurrent.
    pub lux_per_microamp: f32,
    pub temperature_resolution: Resolution,
    /// Upper bound on the conversion wait. `None` spins until the ADC answers.
    pub conversion_timeout_us: Option<u32>,
    pub poll_interval_us: u32,
    /// The IO1X LED lights when its pin is driven low.
    pub led_active_low: bool,
    /// Fractional digits used when rendering telemetry.
    pub telemetry_precision: usize,
}

impl Config {
    pub const DEFAULT: Config = Config {
        vcc_reference: 3.3,
        adc_full_scale: 255,
        load_resistance_ohms: 100_000.0,
        lux_per_microamp: 2.0 * 10.0,
        temperature_resolution: Resolution::Bits12,
        conversion_timeout_us: Some(10_000),
        poll_interval_us: 10,
        led_active_low: true,
        telemetry_precision: 2,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
