//! The message-digest collaborator.
//!
//! The mathematical core does not implement hash functions; it consumes them
//! through this object-safe trait. Parameter blocks store an owned digest and
//! serialize only its algorithm name, so implementations must be cloneable
//! through [`Digest::clone_box`] and recoverable from the name by a caller
//! supplied factory.

use core::fmt;

/// An incremental message digest owned by a single consumer.
pub trait Digest {
    /// Absorb `data` into the digest state.
    fn update(&mut self, data: &[u8]);

    /// Produce the digest of everything absorbed so far and reset the state.
    fn finalize_reset(&mut self) -> Vec<u8>;

    /// Reset the state, discarding absorbed data.
    fn reset(&mut self);

    /// Canonical algorithm name, e.g. `"SHA-256"`. Used by parameter-block
    /// serialization; two digests are interchangeable iff their names match.
    fn algorithm_name(&self) -> &'static str;

    /// Digest length in bytes.
    fn output_size(&self) -> usize;

    /// Clone into a fresh boxed instance with the same (reset) algorithm.
    fn clone_box(&self) -> Box<dyn Digest>;
}

impl Clone for Box<dyn Digest> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digest")
            .field("algorithm", &self.algorithm_name())
            .finish()
    }
}
