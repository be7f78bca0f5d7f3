use num::{bigint::BigUint, traits::Zero};

use crate::Error;

/// Interprets a numeral array as a big-endian base-`radix` integer
/// (`NUM_radix` in SP 800-38G).
///
/// # Errors
///
/// Returns [`Error::NumeralOutOfRange`] naming the position and value of the
/// first digit that is `>= radix`.
pub(crate) fn num(digits: &[u8], radix: usize) -> Result<BigUint, Error> {
    let mut value = BigUint::zero();
    for (pos, &digit) in digits.iter().enumerate() {
        if usize::from(digit) >= radix {
            return Err(Error::NumeralOutOfRange {
                pos,
                value: digit,
                radix,
            });
        }
        value = value * radix + digit;
    }
    Ok(value)
}

/// Represents `x` as `m` numerals in base `radix`, most significant first,
/// zero-padded on the left (`STR_m` in SP 800-38G).
///
/// The caller must have reduced `x` mod `radix^m`.
pub(crate) fn str_radix(x: &BigUint, radix: usize, m: usize) -> Vec<u8> {
    let mut out = vec![0; m];
    if !x.is_zero() {
        let digits = x.to_radix_be(radix as u32);
        debug_assert!(digits.len() <= m);
        out[m - digits.len()..].copy_from_slice(&digits);
    }
    out
}

/// Big-endian byte representation of `x`, zero-padded on the left to `len`
/// bytes.
///
/// The caller must ensure `x < 2^(8 * len)`.
pub(crate) fn to_fixed_be(x: &BigUint, len: usize) -> Vec<u8> {
    let mut out = vec![0; len];
    if !x.is_zero() {
        let bytes = x.to_bytes_be();
        debug_assert!(bytes.len() <= len);
        out[len - bytes.len()..].copy_from_slice(&bytes);
    }
    out
}
