//! Finite-field arithmetic
//!
//! Currently a single family: the binary extension fields GF(2^m) used by
//! Goppa-code constructions.

mod gf2m;

pub use gf2m::{default_polynomial, Gf2mField, MAX_DEGREE, MIN_DEGREE};
