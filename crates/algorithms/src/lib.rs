//! Mathematical core for code-based and lattice-based cryptography
//!
//! This crate provides the arithmetic and combinatorial machinery shared by
//! the McEliece/Niederreiter and NTRUEncrypt constructions:
//!
//! - finite-field arithmetic over GF(2^m) for 2 <= m <= 31;
//! - dense polynomial arithmetic over GF(2^m)[X], including Karatsuba
//!   multiplication, modular inversion and modular square roots;
//! - packed bit-vectors and bit-matrices over GF(2) with column permutations,
//!   systematic-form reduction and inversion;
//! - binary Goppa codes: canonical parity-check matrix construction and
//!   Patterson syndrome decoding;
//! - integer, big-integer and byte utilities used by the layers above.
//!
//! All operations are synchronous and single-threaded. Completed read-only
//! objects (fields, permutations, matrices) may be shared across threads by
//! reference; nothing here is safe for concurrent mutation.

#![forbid(unsafe_code)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Finite-field arithmetic
pub mod field;
pub use field::Gf2mField;

// Polynomial arithmetic over GF(2^m)
pub mod poly;
pub use poly::{Gf2mPoly, SquareRootRing};

// Vectors, matrices and permutations over GF(2) / GF(2^m)
pub mod linear;
pub use linear::{BitMatrix, BitVector, Gf2mVector, Permutation, Vector};

// Goppa-code construction and decoding
pub mod code;
pub use code::goppa;

// Integer, big-integer and byte utilities
pub mod util;
