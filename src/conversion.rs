//! Conversion-complete signalling between the ADC interrupt and the reader.

use embedded_hal::blocking::delay::DelayUs;
use log::warn;
use portable_atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Set by the ADC result-ready interrupt, consumed by the reader.
///
/// Lives in a `static` so the interrupt handler can reach it:
///
/// ```
/// use io1x_light_sensor::ConversionFlag;
///
/// static FLAG: ConversionFlag = ConversionFlag::new();
///
/// FLAG.signal();
/// assert!(FLAG.take());
/// assert!(!FLAG.take());
/// ```
#[derive(Debug)]
pub struct ConversionFlag {
    done: AtomicBool,
}

impl ConversionFlag {
    pub const fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
        }
    }

    /// Marks the pending conversion as complete. Interrupt safe.
    pub fn signal(&self) {
        self.done.store(true, Ordering::Release);
    }

    /// Forgets any completion left over from an earlier conversion.
    pub fn clear(&self) {
        self.done.store(false, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Consumes a completion: returns `true` at most once per `signal`.
    pub fn take(&self) -> bool {
        self.done.swap(false, Ordering::AcqRel)
    }
}

impl Default for ConversionFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits until `flag` is signalled.
///
/// With `timeout_us == None` this is a tight spin with no upper bound, for
/// targets where the interrupt is known to fire. Otherwise the flag is polled
/// every `poll_interval_us` and [`Error::SensorTimeout`] is returned once the
/// accumulated wait reaches `timeout_us`.
pub fn wait_for_conversion<D>(
    flag: &ConversionFlag,
    delay: &mut D,
    timeout_us: Option<u32>,
    poll_interval_us: u32,
) -> Result<()>
where
    D: DelayUs<u32>,
{
    let Some(timeout_us) = timeout_us else {
        while !flag.take() {
            core::hint::spin_loop();
        }
        return Ok(());
    };

    let step = poll_interval_us.max(1);
    let mut waited: u32 = 0;
    loop {
        if flag.take() {
            return Ok(());
        }
        if waited >= timeout_us {
            warn!("ADC conversion not complete after {} us", waited);
            return Err(Error::SensorTimeout);
        }
        delay.delay_us(step);
        waited = waited.saturating_add(step);
    }
}
