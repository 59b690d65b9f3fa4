//! Dense bit-vectors over GF(2)
//!
//! Bits are packed LSB-first into 32-bit words: bit i lives in word i / 32
//! at position i % 32. The length is stored explicitly and never inferred
//! from the word array; unused high bits of the last word are kept zero by
//! every mutating operation.

use core::fmt;
use std::sync::Arc;

use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::field::Gf2mField;
use crate::linear::{Gf2mVector, Permutation};

const WORD_BITS: usize = 32;

/// A length-n vector over GF(2).
#[derive(Clone, PartialEq, Eq)]
pub struct BitVector {
    length: usize,
    words: Vec<u32>,
}

impl BitVector {
    fn words_for(length: usize) -> usize {
        length.div_ceil(WORD_BITS)
    }

    /// The all-zero vector of the given bit length.
    pub fn zeros(length: usize) -> Self {
        Self {
            length,
            words: vec![0u32; Self::words_for(length)],
        }
    }

    /// Builds a vector from pre-packed words; padding bits are cleared.
    pub fn from_words(length: usize, mut words: Vec<u32>) -> Result<Self> {
        if words.len() != Self::words_for(length) {
            return Err(Error::Length {
                context: "bit-vector words",
                expected: Self::words_for(length),
                actual: words.len(),
            });
        }
        Self::mask_padding(length, &mut words);
        Ok(Self { length, words })
    }

    /// A uniform random vector.
    pub fn random<R: CryptoRng + RngCore>(length: usize, rng: &mut R) -> Self {
        let mut words: Vec<u32> = (0..Self::words_for(length)).map(|_| rng.next_u32()).collect();
        Self::mask_padding(length, &mut words);
        Self { length, words }
    }

    /// A uniform random vector of exact Hamming weight `weight`.
    ///
    /// Positions are drawn by a partial Fisher-Yates shuffle, so every
    /// weight-t vector is equally likely.
    pub fn random_weight<R: CryptoRng + RngCore>(
        length: usize,
        weight: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if weight > length {
            return Err(Error::param(
                "weight",
                format!("weight {} exceeds vector length {}", weight, length),
            ));
        }
        let mut pool: Vec<usize> = (0..length).collect();
        let mut out = Self::zeros(length);
        for i in 0..weight {
            let j = rng.gen_range(i..length);
            pool.swap(i, j);
            out.set_bit(pool[i]);
        }
        Ok(out)
    }

    fn mask_padding(length: usize, words: &mut [u32]) {
        let rem = length % WORD_BITS;
        if rem != 0 {
            if let Some(last) = words.last_mut() {
                *last &= (1u32 << rem) - 1;
            }
        }
    }

    /// Bit length.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the vector has length zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The packed words, LSB-first.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Reads bit `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.length, "bit index {} out of range", i);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Sets bit `i` to 1.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set_bit(&mut self, i: usize) {
        assert!(i < self.length, "bit index {} out of range", i);
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    /// Clears bit `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn clear_bit(&mut self, i: usize) {
        assert!(i < self.length, "bit index {} out of range", i);
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
    }

    /// Flips bit `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn flip_bit(&mut self, i: usize) {
        assert!(i < self.length, "bit index {} out of range", i);
        self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
    }

    /// Whether every bit is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Hamming weight.
    pub fn weight(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bitwise XOR of two equal-length vectors.
    pub fn xor(&self, other: &Self) -> Result<Self> {
        if self.length != other.length {
            return Err(Error::Length {
                context: "bit-vector xor",
                expected: self.length,
                actual: other.length,
            });
        }
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        Ok(Self {
            length: self.length,
            words,
        })
    }

    /// Applies a column permutation: `out[j] = self[p[j]]`.
    pub fn permute(&self, p: &Permutation) -> Result<Self> {
        if p.len() != self.length {
            return Err(Error::Length {
                context: "bit-vector permutation",
                expected: self.length,
                actual: p.len(),
            });
        }
        let mut out = Self::zeros(self.length);
        for j in 0..self.length {
            if self.bit(p.get(j)) {
                out.set_bit(j);
            }
        }
        Ok(out)
    }

    /// Reinterprets the bits as a vector of GF(2^m) elements.
    ///
    /// The length must be a multiple of m. Groups of m consecutive bits are
    /// consumed in ascending bit order while elements are filled from the
    /// highest index down and from the most significant coefficient bit
    /// down; this is the inverse of the bit layout produced by the canonical
    /// parity-check expansion, so syndromes map onto syndrome-polynomial
    /// coefficients directly.
    pub fn to_field_vector(&self, field: &Arc<Gf2mField>) -> Result<Gf2mVector> {
        let m = field.degree();
        if self.length % m != 0 {
            return Err(Error::param(
                "bit length",
                format!("{} is not a multiple of the field degree {}", self.length, m),
            ));
        }
        let t = self.length / m;
        let mut elements = vec![0u32; t];
        let mut count = 0;
        for i in (0..t).rev() {
            for j in (0..m).rev() {
                if self.bit(count) {
                    elements[i] |= 1 << j;
                }
                count += 1;
            }
        }
        Gf2mVector::new(field.clone(), elements)
    }

    /// Byte encoding: bit i goes to byte i / 8, position i % 8.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.length.div_ceil(8)];
        for i in 0..self.length {
            if self.bit(i) {
                out[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }

    /// Decodes a byte buffer produced by [`BitVector::encode`].
    ///
    /// The buffer length must match the bit length exactly and padding bits
    /// above the declared length must be zero.
    pub fn decode(length: usize, bytes: &[u8]) -> Result<Self> {
        let expected = length.div_ceil(8);
        if bytes.len() != expected {
            return Err(Error::Length {
                context: "bit-vector decoding",
                expected,
                actual: bytes.len(),
            });
        }
        let mut out = Self::zeros(length);
        for (b, &byte) in bytes.iter().enumerate() {
            for j in 0..8 {
                if (byte >> j) & 1 == 1 {
                    let i = b * 8 + j;
                    if i >= length {
                        return Err(Error::Encoding {
                            context: "bit-vector decoding",
                            details: "padding bits above the declared length are set",
                        });
                    }
                    out.set_bit(i);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVector")
            .field("length", &self.length)
            .field("weight", &self.weight())
            .finish()
    }
}

impl Zeroize for BitVector {
    fn zeroize(&mut self) {
        self.words.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Gf2mField;
    use crate::linear::Permutation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    #[test]
    fn set_and_read_across_word_boundaries() {
        let mut v = BitVector::zeros(70);
        for i in [0usize, 31, 32, 63, 64, 69] {
            v.set_bit(i);
            assert!(v.bit(i));
        }
        assert_eq!(v.weight(), 6);
        v.clear_bit(32);
        assert!(!v.bit(32));
        v.flip_bit(32);
        assert!(v.bit(32));
    }

    #[test]
    fn zero_and_weight() {
        let mut v = BitVector::zeros(40);
        assert!(v.is_zero());
        v.set_bit(39);
        assert!(!v.is_zero());
        assert_eq!(v.weight(), 1);
    }

    #[test]
    fn xor_is_addition() {
        let mut a = BitVector::zeros(10);
        let mut b = BitVector::zeros(10);
        a.set_bit(1);
        a.set_bit(5);
        b.set_bit(5);
        b.set_bit(9);
        let c = a.xor(&b).unwrap();
        assert!(c.bit(1) && !c.bit(5) && c.bit(9));
        assert!(a.xor(&a).unwrap().is_zero());
        assert!(a.xor(&BitVector::zeros(11)).is_err());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for length in [1usize, 7, 8, 33, 64, 100] {
            let v = BitVector::random(length, &mut rng);
            let bytes = v.encode();
            assert_eq!(bytes.len(), length.div_ceil(8));
            assert_eq!(BitVector::decode(length, &bytes).unwrap(), v);
        }
    }

    #[test]
    fn decode_rejects_bad_padding_and_length() {
        assert!(BitVector::decode(4, &[0x10]).is_err());
        assert!(BitVector::decode(4, &[0x0f, 0x00]).is_err());
        assert!(BitVector::decode(4, &[0x0f]).is_ok());
    }

    #[test]
    fn random_weight_is_exact() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..20 {
            let v = BitVector::random_weight(128, 17, &mut rng).unwrap();
            assert_eq!(v.weight(), 17);
        }
        assert!(BitVector::random_weight(4, 5, &mut rng).is_err());
    }

    #[test]
    fn permutation_reorders_bits() {
        let mut v = BitVector::zeros(4);
        v.set_bit(0);
        v.set_bit(2);
        let p = Permutation::from_vec(vec![2, 0, 3, 1]).unwrap();
        let w = v.permute(&p).unwrap();
        // w[j] = v[p[j]]
        assert!(w.bit(0) && w.bit(1) && !w.bit(2) && !w.bit(3));
        let identity = Permutation::identity(4);
        assert_eq!(v.permute(&identity).unwrap(), v);
    }

    #[test]
    fn field_vector_grouping() {
        let field = Arc::new(Gf2mField::new(4).unwrap());
        // 8 bits -> two GF(16) elements; ascending bits feed the highest
        // element first, most significant coefficient first.
        let mut v = BitVector::zeros(8);
        v.set_bit(0); // element 1, bit 3
        v.set_bit(5); // element 0, bit 2
        let fv = v.to_field_vector(&field).unwrap();
        assert_eq!(fv.elements(), &[0b0100, 0b1000]);

        let odd = BitVector::zeros(9);
        assert!(odd.to_field_vector(&field).is_err());
    }
}
