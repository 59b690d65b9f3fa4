//! Parameter sets for post-quantum cryptosystems

pub mod mceliece;
pub mod ntru;
