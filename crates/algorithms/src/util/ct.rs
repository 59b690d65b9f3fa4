//! Constant-time comparison helpers
//!
//! Thin wrappers over `subtle` so callers comparing secret-dependent arrays
//! do not reach for the short-circuiting `==`.

use subtle::ConstantTimeEq;

/// Constant-time equality of two `u32` slices.
///
/// Slices of different lengths compare unequal; the length check itself is
/// not secret.
pub fn eq_u32(a: &[u32], b: &[u32]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Constant-time equality of two byte slices.
pub fn eq_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
