//! Trait definitions for external collaborators

pub mod digest;
pub mod serialize;

pub use digest::Digest;
pub use serialize::{Serialize, SerializeSecret};
