//! Integer to string conversion in an arbitrary base.

use crate::error::UseresponseError;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Renders `number` in `base` using the digits `0-9a-z`, most significant
/// digit first, with a leading `-` for negative numbers.
///
/// # Errors
///
/// Returns [`UseresponseError::InvalidBase`] when `base` is outside `2..=36`.
///
/// # Example
///
/// ```
/// use useresponse::sso::to_base;
///
/// assert_eq!(to_base(255, 16).unwrap(), "ff");
/// assert_eq!(to_base(-5, 2).unwrap(), "-101");
/// assert_eq!(to_base(0, 36).unwrap(), "0");
/// ```
pub fn to_base(number: i64, base: u32) -> Result<String, UseresponseError> {
    if !(2..=DIGITS.len() as u32).contains(&base) {
        return Err(UseresponseError::InvalidBase { base });
    }

    let mut digits = digits_lsb_first(number.unsigned_abs(), u64::from(base));
    if number < 0 {
        digits.push(b'-');
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Digits of `num` in `base`, least significant first. Zero yields `"0"`.
///
/// `base` must be in `2..=36`.
pub(super) fn digits_lsb_first(mut num: u64, base: u64) -> Vec<u8> {
    debug_assert!((2..=DIGITS.len() as u64).contains(&base));

    let mut digits = Vec::new();
    loop {
        digits.push(DIGITS[(num % base) as usize]);
        num /= base;
        if num == 0 {
            return digits;
        }
    }
}
