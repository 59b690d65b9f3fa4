//! Vectors, matrices and permutations over GF(2) and GF(2^m)

mod bit_matrix;
mod bit_vector;
mod field_vector;
mod permutation;

pub use bit_matrix::BitMatrix;
pub use bit_vector::BitVector;
pub use field_vector::Gf2mVector;
pub use permutation::Permutation;

use crate::error::{Error, Result};

/// A vector over either GF(2) or GF(2^m).
///
/// The two shapes share the operations below; everything shape-specific
/// stays on the concrete types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Vector {
    /// A packed bit-vector over GF(2).
    Bit(BitVector),
    /// An element vector over GF(2^m).
    Field(Gf2mVector),
}

impl Vector {
    /// Canonical byte encoding of the underlying vector.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Vector::Bit(v) => v.encode(),
            Vector::Field(v) => v.encode(),
        }
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Vector::Bit(v) => v.is_zero(),
            Vector::Field(v) => v.is_zero(),
        }
    }

    /// Applies a permutation to the entries.
    pub fn permute(&self, p: &Permutation) -> Result<Vector> {
        match self {
            Vector::Bit(v) => Ok(Vector::Bit(v.permute(p)?)),
            Vector::Field(v) => Ok(Vector::Field(v.permute(p)?)),
        }
    }

    /// Entry-wise addition; both operands must have the same shape.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        match (self, other) {
            (Vector::Bit(a), Vector::Bit(b)) => Ok(Vector::Bit(a.xor(b)?)),
            (Vector::Field(a), Vector::Field(b)) => Ok(Vector::Field(a.add(b)?)),
            _ => Err(Error::param(
                "vector addition",
                "operands are vectors over different structures",
            )),
        }
    }
}

impl From<BitVector> for Vector {
    fn from(v: BitVector) -> Self {
        Vector::Bit(v)
    }
}

impl From<Gf2mVector> for Vector {
    fn from(v: Gf2mVector) -> Self {
        Vector::Field(v)
    }
}
