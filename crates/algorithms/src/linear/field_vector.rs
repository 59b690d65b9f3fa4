//! Length-bounded vectors over GF(2^m)

use core::fmt;
use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::field::Gf2mField;
use crate::linear::Permutation;

/// A vector of GF(2^m) elements tied to its field.
#[derive(Clone)]
pub struct Gf2mVector {
    field: Arc<Gf2mField>,
    elements: Vec<u32>,
}

impl Gf2mVector {
    /// Validated construction: every element must lie in the field.
    pub fn new(field: Arc<Gf2mField>, elements: Vec<u32>) -> Result<Self> {
        for &e in &elements {
            if !field.is_element(e) {
                return Err(Error::param(
                    "elements",
                    format!("{} is not an element of {}", e, field),
                ));
            }
        }
        Ok(Self { field, elements })
    }

    /// The all-zero vector of the given length.
    pub fn zero(field: Arc<Gf2mField>, length: usize) -> Self {
        Self {
            field,
            elements: vec![0u32; length],
        }
    }

    /// A vector of uniform random field elements.
    pub fn random<R: CryptoRng + RngCore>(
        field: Arc<Gf2mField>,
        length: usize,
        rng: &mut R,
    ) -> Self {
        let elements = (0..length).map(|_| field.random_element(rng)).collect();
        Self { field, elements }
    }

    /// The underlying field.
    pub fn field(&self) -> &Arc<Gf2mField> {
        &self.field
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the vector has length zero.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element array.
    pub fn elements(&self) -> &[u32] {
        &self.elements
    }

    /// Whether every element is zero.
    pub fn is_zero(&self) -> bool {
        self.elements.iter().all(|&e| e == 0)
    }

    /// Coefficient-wise addition, which over characteristic 2 is XOR.
    ///
    /// Both operands must share the field and the length.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.field != other.field {
            return Err(Error::param("vector addition", "fields do not match"));
        }
        if self.len() != other.len() {
            return Err(Error::Length {
                context: "vector addition",
                expected: self.len(),
                actual: other.len(),
            });
        }
        let elements = self
            .elements
            .iter()
            .zip(other.elements.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        Ok(Self {
            field: self.field.clone(),
            elements,
        })
    }

    /// Applies a permutation: `out[j] = self[p[j]]`.
    pub fn permute(&self, p: &Permutation) -> Result<Self> {
        if p.len() != self.len() {
            return Err(Error::Length {
                context: "vector permutation",
                expected: self.len(),
                actual: p.len(),
            });
        }
        let elements = (0..self.len()).map(|j| self.elements[p.get(j)]).collect();
        Ok(Self {
            field: self.field.clone(),
            elements,
        })
    }

    /// Byte encoding: each element packs into ceil(m/8) bytes,
    /// little-endian within the element.
    pub fn encode(&self) -> Vec<u8> {
        let per_element = self.field.degree().div_ceil(8);
        let mut out = Vec::with_capacity(self.elements.len() * per_element);
        for &e in &self.elements {
            out.extend_from_slice(&e.to_le_bytes()[..per_element]);
        }
        out
    }

    /// Decodes a byte buffer produced by [`Gf2mVector::encode`].
    pub fn decode(field: Arc<Gf2mField>, bytes: &[u8]) -> Result<Self> {
        let per_element = field.degree().div_ceil(8);
        if bytes.len() % per_element != 0 {
            return Err(Error::Encoding {
                context: "field-vector decoding",
                details: "buffer length is not a multiple of the per-element size",
            });
        }
        let mut elements = Vec::with_capacity(bytes.len() / per_element);
        for chunk in bytes.chunks_exact(per_element) {
            let mut word = [0u8; 4];
            word[..per_element].copy_from_slice(chunk);
            let e = u32::from_le_bytes(word);
            if !field.is_element(e) {
                return Err(Error::Encoding {
                    context: "field-vector decoding",
                    details: "decoded value is not a field element",
                });
            }
            elements.push(e);
        }
        Ok(Self { field, elements })
    }
}

impl PartialEq for Gf2mVector {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.elements == other.elements
    }
}

impl Eq for Gf2mVector {}

impl fmt::Debug for Gf2mVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gf2mVector")
            .field("field", &self.field)
            .field("len", &self.elements.len())
            .finish()
    }
}

impl Zeroize for Gf2mVector {
    fn zeroize(&mut self) {
        self.elements.zeroize();
    }
}
