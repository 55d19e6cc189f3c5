//! Allocation-free fixed-precision float formatting.

use crate::error::{Error, Result};

/// 2^32, the first magnitude whose integral part overflows `u32`.
const U32_LIMIT: f32 = 4_294_967_296.0;

/// Formats `value` with exactly `precision` fractional digits into `buf`.
///
/// The text is followed by a NUL byte so the buffer can be handed to C-style
/// consumers; the returned length excludes it. A decimal point is always
/// written, even when `precision` is zero (`42.0` → `"42."`).
///
/// Digits are truncated, not rounded, so `f32` representation error shows
/// through: `5.2` is stored as `5.1999998` and prints as `"5.1"` at one
/// digit. A negative value that truncates to zero keeps its sign
/// (`-0.001` → `"-0.00"`).
///
/// NaN, infinities and magnitudes whose integral part does not fit a `u32`
/// are rejected with [`Error::ValueOutOfRange`].
///
/// ```
/// use io1x_light_sensor::float_to_string;
///
/// let mut buf = [0u8; 16];
/// let len = float_to_string(3.14159, &mut buf, 2).unwrap();
/// assert_eq!(&buf[..len], b"3.14");
/// assert_eq!(buf[len], 0);
/// ```
///
/// Nothing is written if the buffer is too short:
///
/// ```
/// use io1x_light_sensor::{float_to_string, Error};
///
/// let mut buf = [0u8; 4];
/// assert_eq!(
///     float_to_string(3.14159, &mut buf, 2),
///     Err(Error::BufferTooSmall { needed: 5, available: 4 })
/// );
/// ```
pub fn float_to_string(value: f32, buf: &mut [u8], precision: usize) -> Result<usize> {
    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };

    if !magnitude.is_finite() || magnitude >= U32_LIMIT {
        return Err(Error::ValueOutOfRange);
    }
    let integral = magnitude as u32;

    let needed = usize::from(negative) + digit_count(integral) + 1;
    let needed = needed
        .checked_add(precision)
        .and_then(|n| n.checked_add(1))
        .ok_or(Error::BufferTooSmall {
            needed: usize::MAX,
            available: buf.len(),
        })?;
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }

    let mut i = 0;
    if negative {
        buf[i] = b'-';
        i += 1;
    }
    i += write_integral_digits(integral, &mut buf[i..]);

    buf[i] = b'.';
    i += 1;

    let mut fraction = magnitude - integral as f32;
    for _ in 0..precision {
        fraction *= 10.0;
        let digit = (fraction as u8).min(9);
        buf[i] = b'0' + digit;
        i += 1;
        fraction -= f32::from(digit);
    }

    buf[i] = 0;
    Ok(i)
}

fn digit_count(mut n: u32) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Writes the decimal digits of `n` to the front of `out`, most significant
/// first, and returns how many were written. `out` must have room for
/// `digit_count(n)` bytes.
///
/// Digits come out least significant first and the run is then reversed in
/// place.
fn write_integral_digits(mut n: u32, out: &mut [u8]) -> usize {
    let mut len = 0;
    loop {
        out[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out[..len].reverse();
    len
}
