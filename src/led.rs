//! Indicator LED with board-defined polarity.

use embedded_hal::digital::v2::OutputPin;

/// LED on one output pin. `active_low` selects which level lights it.
pub struct Led<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> Led<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn on(&mut self) -> Result<(), P::Error> {
        if self.active_low {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        }
    }

    pub fn off(&mut self) -> Result<(), P::Error> {
        if self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}
