//! Light sensor model: ADC code → volts → amperes → lux.
//!
//! The phototransistor sources current through a fixed load resistor, so the
//! voltage deficit below the supply is proportional to the photocurrent, and
//! the photocurrent is linear in illuminance.

use crate::config::Config;

const AMPS_PER_MICROAMP: f32 = 0.000_001;

/// Scales a raw ADC code to the voltage seen on the sensor input.
///
/// Codes above `adc_full_scale` are clamped, so the result never exceeds the
/// reference.
pub fn voltage_from_sample(sample: u16, config: &Config) -> f32 {
    let full_scale = config.adc_full_scale.max(1);
    let sample = sample.min(full_scale);
    f32::from(sample) * config.vcc_reference / f32::from(full_scale)
}

/// Photocurrent in amperes for a measured sensor voltage.
pub fn current_from_voltage(voltage: f32, config: &Config) -> f32 {
    (config.vcc_reference - voltage) / config.load_resistance_ohms
}

/// Illuminance in lux for a photocurrent in amperes.
pub fn illuminance_from_current(current: f32, config: &Config) -> f32 {
    (current * config.lux_per_microamp) / AMPS_PER_MICROAMP
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: Config = Config::DEFAULT;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.0)
    }

    #[test]
    fn voltage_is_linear_in_the_sample() {
        for sample in 0..=255u16 {
            let expected = f32::from(sample) * 3.3 / 255.0;
            assert_eq!(voltage_from_sample(sample, &CONFIG), expected);
        }
        assert_eq!(voltage_from_sample(0, &CONFIG), 0.0);
        assert_eq!(voltage_from_sample(255, &CONFIG), 3.3);
    }

    #[test]
    fn voltage_is_monotonic() {
        let mut previous = voltage_from_sample(0, &CONFIG);
        for sample in 1..=255u16 {
            let voltage = voltage_from_sample(sample, &CONFIG);
            assert!(voltage >= previous, "sample {}", sample);
            previous = voltage;
        }
    }

    #[test]
    fn samples_above_full_scale_clamp_to_reference() {
        assert_eq!(voltage_from_sample(4095, &CONFIG), 3.3);
    }

    #[test]
    fn current_follows_the_load_resistor() {
        assert_eq!(current_from_voltage(3.3, &CONFIG), 0.0);
        assert!(close(current_from_voltage(1.3, &CONFIG), 2.0e-5));
        assert!(close(current_from_voltage(0.0, &CONFIG), 3.3e-5));
        // Above the supply the deficit goes negative and is passed through.
        assert!(current_from_voltage(4.0, &CONFIG) < 0.0);
    }

    #[test]
    fn illuminance_is_twenty_lux_per_microamp() {
        assert!(close(illuminance_from_current(1.0e-6, &CONFIG), 20.0));
        assert!(close(illuminance_from_current(3.3e-5, &CONFIG), 660.0));
        assert_eq!(illuminance_from_current(0.0, &CONFIG), 0.0);
        assert!(illuminance_from_current(-1.0e-6, &CONFIG) < 0.0);
    }

    #[test]
    fn calculators_are_pure() {
        for voltage in [0.0f32, 0.42, 1.65, 3.3, -1.0] {
            let a = current_from_voltage(voltage, &CONFIG);
            let b = current_from_voltage(voltage, &CONFIG);
            assert_eq!(a.to_bits(), b.to_bits());

            let a = illuminance_from_current(a, &CONFIG);
            let b = illuminance_from_current(b, &CONFIG);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn calibration_comes_from_the_config() {
        let config = Config {
            vcc_reference: 5.0,
            load_resistance_ohms: 10_000.0,
            lux_per_microamp: 1.0,
            ..Config::DEFAULT
        };
        assert!(close(current_from_voltage(4.0, &config), 1.0e-4));
        assert!(close(illuminance_from_current(1.0e-4, &config), 100.0));
        assert_eq!(voltage_from_sample(255, &config), 5.0);
    }
}
