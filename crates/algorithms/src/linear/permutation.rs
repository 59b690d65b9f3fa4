//! Permutations of {0, ..., n-1}

use rand::{CryptoRng, Rng, RngCore};

use crate::error::{Error, Result};

/// A bijection of {0, ..., n-1}, stored as the image array.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on n points.
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
        }
    }

    /// A uniform random permutation via Fisher-Yates.
    pub fn random<R: CryptoRng + RngCore>(n: usize, rng: &mut R) -> Self {
        let mut perm: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = rng.gen_range(0..=i);
            perm.swap(i, j);
        }
        Self { perm }
    }

    /// Validated construction from an explicit image array.
    ///
    /// Rejects duplicates and out-of-range entries.
    pub fn from_vec(perm: Vec<usize>) -> Result<Self> {
        let n = perm.len();
        let mut seen = vec![false; n];
        for &value in &perm {
            if value >= n {
                return Err(Error::param(
                    "permutation",
                    format!("entry {} out of range for size {}", value, n),
                ));
            }
            if seen[value] {
                return Err(Error::param(
                    "permutation",
                    format!("entry {} appears more than once", value),
                ));
            }
            seen[value] = true;
        }
        Ok(Self { perm })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Whether the permutation acts on the empty set.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Image of `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> usize {
        self.perm[i]
    }

    /// The image array.
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }

    /// Composition: `(self.compose(other))(i) == self(other(i))`.
    pub fn compose(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(Error::Length {
                context: "permutation composition",
                expected: self.len(),
                actual: other.len(),
            });
        }
        let perm = other.perm.iter().map(|&i| self.perm[i]).collect();
        Ok(Self { perm })
    }

    /// The inverse permutation.
    pub fn invert(&self) -> Self {
        let mut perm = vec![0usize; self.perm.len()];
        for (i, &image) in self.perm.iter().enumerate() {
            perm[image] = i;
        }
        Self { perm }
    }
}
