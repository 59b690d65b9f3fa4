//! Public API traits and types for the pqcore library
//!
//! This crate provides the public API surface shared by the pqcore member
//! crates: trait definitions for external collaborators (digests, byte
//! serialization) and the error taxonomy every operation reports through.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::{Digest, Serialize, SerializeSecret};
