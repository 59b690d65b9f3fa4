//! Digest collaborators backed by the `sha2` crate
//!
//! The parameter blocks store a digest by ownership and serialize only its
//! algorithm name; [`digest_from_name`] is the factory used to resolve the
//! name on deserialization.

use pqcore_api::Digest;
use sha2::Digest as Sha2Digest;

/// SHA-256 digest collaborator.
#[derive(Clone, Default)]
pub struct Sha256Digest {
    inner: sha2::Sha256,
}

impl Sha256Digest {
    /// Creates a fresh SHA-256 state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Digest for Sha256Digest {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.inner, data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        Sha2Digest::finalize_reset(&mut self.inner).to_vec()
    }

    fn reset(&mut self) {
        Sha2Digest::reset(&mut self.inner);
    }

    fn algorithm_name(&self) -> &'static str {
        "SHA-256"
    }

    fn output_size(&self) -> usize {
        32
    }

    fn clone_box(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// SHA-512 digest collaborator.
#[derive(Clone, Default)]
pub struct Sha512Digest {
    inner: sha2::Sha512,
}

impl Sha512Digest {
    /// Creates a fresh SHA-512 state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Digest for Sha512Digest {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.inner, data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        Sha2Digest::finalize_reset(&mut self.inner).to_vec()
    }

    fn reset(&mut self) {
        Sha2Digest::reset(&mut self.inner);
    }

    fn algorithm_name(&self) -> &'static str {
        "SHA-512"
    }

    fn output_size(&self) -> usize {
        64
    }

    fn clone_box(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// Maps a stored algorithm name back to a digest instance.
pub fn digest_from_name(name: &str) -> Option<Box<dyn Digest>> {
    match name {
        "SHA-256" => Some(Box::new(Sha256Digest::new())),
        "SHA-512" => Some(Box::new(Sha512Digest::new())),
        _ => None,
    }
}
