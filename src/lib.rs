//! # pqcore
//!
//! The mathematical core of a post-quantum cryptography toolkit: arithmetic
//! over GF(2^m), polynomials and bit-linear algebra for the
//! McEliece/Niederreiter cryptosystem over binary Goppa codes, and the
//! parameter model shared with NTRUEncrypt.
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports functionality from the member
//! crates:
//!
//! - [`api`]: error taxonomy and collaborator traits (digest, serialize)
//! - [`algorithms`]: fields, polynomials, bit-matrices, Goppa codes
//! - [`params`]: named parameter sets and digest implementations

#![forbid(unsafe_code)]

pub use pqcore_algorithms as algorithms;
pub use pqcore_api as api;
pub use pqcore_params as params;

/// Common imports for pqcore users
pub mod prelude {
    // Error types
    pub use crate::api::{Error, Result};

    // Collaborator traits
    pub use crate::api::{Digest, Serialize, SerializeSecret};

    // Core math types
    pub use crate::algorithms::code::goppa;
    pub use crate::algorithms::{
        BitMatrix, BitVector, Gf2mField, Gf2mPoly, Gf2mVector, Permutation, SquareRootRing,
        Vector,
    };

    // Parameter sets and digests
    pub use crate::params::{digest_from_name, NtruEncryptParams, NtruPolyType};
}
