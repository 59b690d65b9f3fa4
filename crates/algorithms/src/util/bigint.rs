//! Utilities over arbitrary-precision integers
//!
//! Conversions between big integers and the digit arrays consumed by
//! polynomial coders. Comparison here is NOT constant-time; callers holding
//! secret integers must not branch on it where timing matters.

use core::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Compares two big integers. Not constant-time.
pub fn compare(a: &BigUint, b: &BigUint) -> Ordering {
    a.cmp(b)
}

/// Interprets big-endian bytes as an unsigned big integer.
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Big-endian byte encoding without leading zeros (`0` encodes to `[0]`).
pub fn to_bytes_be(value: &BigUint) -> Vec<u8> {
    value.to_bytes_be()
}

/// Decomposes `value` into `len` base-q digits, least significant first.
///
/// The division/remainder chain stays in big-integer arithmetic the whole
/// way down; each digit is narrowed only after reduction, so inputs of any
/// width convert exactly. Fails if `value` needs more than `len` digits.
pub fn to_digits_mod_q(value: &BigUint, q: u32, len: usize) -> Result<Vec<u32>> {
    if q < 2 {
        return Err(Error::param("q", "modulus must be at least 2"));
    }
    let q_big = BigUint::from(q);
    let mut digits = vec![0u32; len];
    let mut rest = value.clone();
    for digit in digits.iter_mut() {
        let r = &rest % &q_big;
        // r < q <= u32::MAX, so the narrowing cannot fail
        *digit = r.to_u32().unwrap_or(0);
        rest = &rest / &q_big;
    }
    if !rest.is_zero() {
        return Err(Error::Length {
            context: "base-q digit decomposition",
            expected: len,
            actual: len + 1,
        });
    }
    Ok(digits)
}

/// Recomposes a base-q digit array (least significant first) into an integer.
pub fn from_digits_mod_q(digits: &[u32], q: u32) -> Result<BigUint> {
    if q < 2 {
        return Err(Error::param("q", "modulus must be at least 2"));
    }
    let q_big = BigUint::from(q);
    let mut value = BigUint::zero();
    for &digit in digits.iter().rev() {
        if digit >= q {
            return Err(Error::param("digits", "digit not reduced modulo q"));
        }
        value = value * &q_big + BigUint::from(digit);
    }
    Ok(value)
}
