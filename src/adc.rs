//! Light sensor ADC seam.
//!
//! The reader only needs three things from the converter: enable the input,
//! kick off a conversion, and hand back the last result. Completion is
//! reported out of band through a [`ConversionFlag`], normally from the
//! result-ready interrupt.

use core::fmt::Debug;
use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use crate::conversion::ConversionFlag;

pub trait ConversionAdc {
    type Error: Debug;

    fn enable_channel(&mut self) -> Result<(), Self::Error>;

    /// Requests a conversion. Completion must eventually signal the flag
    /// the board was initialised with.
    fn start_conversion(&mut self) -> Result<(), Self::Error>;

    /// Result of the most recent completed conversion.
    fn read_sample(&mut self) -> Result<u16, Self::Error>;
}

/// Drives a polled `embedded-hal` [`OneShot`] converter as a [`ConversionAdc`].
///
/// The conversion runs to completion inside `start_conversion`, which then
/// signals the flag itself. Useful on boards where the ADC interrupt is not
/// wired up.
pub struct OneShotAdc<'f, ADC, A, P> {
    adc: A,
    pin: P,
    flag: &'f ConversionFlag,
    sample: u16,
    _adc: PhantomData<ADC>,
}

impl<'f, ADC, A, P> OneShotAdc<'f, ADC, A, P>
where
    A: OneShot<ADC, u16, P>,
    P: Channel<ADC>,
{
    pub fn new(adc: A, pin: P, flag: &'f ConversionFlag) -> Self {
        Self {
            adc,
            pin,
            flag,
            sample: 0,
            _adc: PhantomData,
        }
    }

    pub fn release(self) -> (A, P) {
        (self.adc, self.pin)
    }
}

impl<'f, ADC, A, P> ConversionAdc for OneShotAdc<'f, ADC, A, P>
where
    A: OneShot<ADC, u16, P>,
    A::Error: Debug,
    P: Channel<ADC>,
{
    type Error = A::Error;

    fn enable_channel(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn start_conversion(&mut self) -> Result<(), Self::Error> {
        self.sample = nb::block!(self.adc.read(&mut self.pin))?;
        self.flag.signal();
        Ok(())
    }

    fn read_sample(&mut self) -> Result<u16, Self::Error> {
        Ok(self.sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh0::adc::{Mock, MockChan0, Transaction};
    use embedded_hal_mock::eh0::MockError;
    use std::io::ErrorKind;

    #[test]
    fn conversion_signals_and_keeps_the_sample() {
        let flag = ConversionFlag::new();
        let expectations = [Transaction::read(0, 0x80u16)];
        let mut adc = OneShotAdc::new(Mock::new(&expectations), MockChan0 {}, &flag);

        adc.enable_channel().unwrap();
        assert!(!flag.is_set());
        adc.start_conversion().unwrap();
        assert!(flag.take());
        assert_eq!(adc.read_sample().unwrap(), 0x80);
        // Reading again does not start a new conversion.
        assert_eq!(adc.read_sample().unwrap(), 0x80);

        let (mut mock, _pin) = adc.release();
        mock.done();
    }

    #[test]
    fn failed_conversion_leaves_the_flag_clear() {
        let flag = ConversionFlag::new();
        let expectations = [Transaction::read(0, 0u16)
            .with_error(MockError::Io(ErrorKind::InvalidData))];
        let mut adc = OneShotAdc::new(Mock::new(&expectations), MockChan0 {}, &flag);

        assert!(adc.start_conversion().is_err());
        assert!(!flag.is_set());

        let (mut mock, _pin) = adc.release();
        mock.done();
    }
}
