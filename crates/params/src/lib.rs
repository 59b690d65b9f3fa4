//! Parameter sets for the pqcore cryptosystems
//!
//! Named parameter sets with their canonical serializations, plus the
//! digest implementations they reference. Every derived quantity is a pure
//! function of the primary inputs, so two blocks built from the same
//! primaries always compare equal.

#![forbid(unsafe_code)]

pub mod digest;
pub mod pqc;

pub use digest::{digest_from_name, Sha256Digest, Sha512Digest};
pub use pqc::ntru::{NtruEncryptParams, NtruPolyType};
