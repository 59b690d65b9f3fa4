//! Dense bit-matrices over GF(2)
//!
//! Row-major storage: each row is a packed bit array of ceil(cols/32)
//! 32-bit words, LSB-first within each word. Padding bits above the declared
//! column count are kept zero by every mutating operation, so whole-word
//! XOR and popcount never see garbage.

use core::fmt;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::linear::{BitVector, Permutation};

const WORD_BITS: usize = 32;

/// A rows x cols matrix over GF(2).
#[derive(Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    words_per_row: usize,
    data: Vec<u32>,
}

impl BitMatrix {
    /// The all-zero matrix.
    pub fn zero(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::param(
                "matrix shape",
                format!("dimensions must be positive, got {}x{}", rows, cols),
            ));
        }
        let words_per_row = cols.div_ceil(WORD_BITS);
        Ok(Self {
            rows,
            cols,
            words_per_row,
            data: vec![0u32; rows * words_per_row],
        })
    }

    /// The n x n identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut out = Self::zero(n, n)?;
        for i in 0..n {
            out.set_bit(i, i);
        }
        Ok(out)
    }

    /// A uniform random matrix.
    pub fn random<R: CryptoRng + RngCore>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut out = Self::zero(rows, cols)?;
        for word in out.data.iter_mut() {
            *word = rng.next_u32();
        }
        out.mask_padding();
        Ok(out)
    }

    fn mask_padding(&mut self) {
        let rem = self.cols % WORD_BITS;
        if rem != 0 {
            let mask = (1u32 << rem) - 1;
            for r in 0..self.rows {
                self.data[r * self.words_per_row + self.words_per_row - 1] &= mask;
            }
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn row_range(&self, r: usize) -> core::ops::Range<usize> {
        let start = r * self.words_per_row;
        start..start + self.words_per_row
    }

    /// The packed words of row `r`.
    pub fn row_words(&self, r: usize) -> &[u32] {
        assert!(r < self.rows, "row index {} out of range", r);
        &self.data[self.row_range(r)]
    }

    /// Reads the bit at (r, c).
    ///
    /// # Panics
    /// Panics if the indices are out of range.
    #[inline]
    pub fn bit(&self, r: usize, c: usize) -> bool {
        assert!(r < self.rows && c < self.cols, "index out of range");
        (self.data[r * self.words_per_row + c / WORD_BITS] >> (c % WORD_BITS)) & 1 == 1
    }

    /// Sets the bit at (r, c).
    ///
    /// # Panics
    /// Panics if the indices are out of range.
    #[inline]
    pub fn set_bit(&mut self, r: usize, c: usize) {
        assert!(r < self.rows && c < self.cols, "index out of range");
        self.data[r * self.words_per_row + c / WORD_BITS] |= 1 << (c % WORD_BITS);
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.words_per_row {
            self.data
                .swap(a * self.words_per_row + k, b * self.words_per_row + k);
        }
    }

    /// XORs row `source` into row `target`.
    fn xor_row_from(&mut self, target: usize, source: usize) {
        for k in 0..self.words_per_row {
            let s = self.data[source * self.words_per_row + k];
            self.data[target * self.words_per_row + k] ^= s;
        }
    }

    /// Column permutation: column j of the result is column `p[j]` of self.
    pub fn right_multiply(&self, p: &Permutation) -> Result<Self> {
        if p.len() != self.cols {
            return Err(Error::Length {
                context: "matrix column permutation",
                expected: self.cols,
                actual: p.len(),
            });
        }
        let mut out = Self::zero(self.rows, self.cols)?;
        for r in 0..self.rows {
            for j in 0..self.cols {
                if self.bit(r, p.get(j)) {
                    out.set_bit(r, j);
                }
            }
        }
        Ok(out)
    }

    /// The square submatrix of columns [0, rows).
    pub fn left_sub_matrix(&self) -> Result<Self> {
        if self.cols < self.rows {
            return Err(Error::param(
                "left submatrix",
                "matrix has fewer columns than rows",
            ));
        }
        let mut out = Self::zero(self.rows, self.rows)?;
        for r in 0..self.rows {
            for c in 0..self.rows {
                if self.bit(r, c) {
                    out.set_bit(r, c);
                }
            }
        }
        Ok(out)
    }

    /// The submatrix of columns [rows, cols).
    pub fn right_sub_matrix(&self) -> Result<Self> {
        if self.cols <= self.rows {
            return Err(Error::param(
                "right submatrix",
                "matrix has no columns beyond the square block",
            ));
        }
        let mut out = Self::zero(self.rows, self.cols - self.rows)?;
        for r in 0..self.rows {
            for c in self.rows..self.cols {
                if self.bit(r, c) {
                    out.set_bit(r, c - self.rows);
                }
            }
        }
        Ok(out)
    }

    /// Matrix inverse over GF(2) by Gauss-Jordan elimination.
    ///
    /// Returns an arithmetic error when the matrix is singular; callers that
    /// resample (the systematic-form loop) branch on that instead of
    /// catching anything.
    pub fn compute_inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(Error::param(
                "matrix inversion",
                format!("matrix is {}x{}, not square", self.rows, self.cols),
            ));
        }
        let n = self.rows;
        let mut work = self.clone();
        let mut inv = Self::identity(n)?;
        for col in 0..n {
            let Some(pivot) = (col..n).find(|&r| work.bit(r, col)) else {
                return Err(Error::Arithmetic {
                    operation: "matrix inversion",
                    details: "matrix is singular",
                });
            };
            work.swap_rows(col, pivot);
            inv.swap_rows(col, pivot);
            for r in 0..n {
                if r != col && work.bit(r, col) {
                    work.xor_row_from(r, col);
                    inv.xor_row_from(r, col);
                }
            }
        }
        Ok(inv)
    }

    /// Matrix product `self * other` over GF(2).
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::Length {
                context: "matrix multiplication",
                expected: self.cols,
                actual: other.rows,
            });
        }
        let mut out = Self::zero(self.rows, other.cols)?;
        for r in 0..self.rows {
            for k in 0..self.cols {
                if self.bit(r, k) {
                    for w in 0..out.words_per_row {
                        let s = other.data[k * other.words_per_row + w];
                        out.data[r * out.words_per_row + w] ^= s;
                    }
                }
            }
        }
        Ok(out)
    }

    /// Row-vector times matrix: `v * self`, with `v.len() == rows`.
    pub fn left_multiply(&self, v: &BitVector) -> Result<BitVector> {
        if v.len() != self.rows {
            return Err(Error::Length {
                context: "vector-matrix product",
                expected: self.rows,
                actual: v.len(),
            });
        }
        let mut acc = vec![0u32; self.words_per_row];
        for r in 0..self.rows {
            if v.bit(r) {
                for (w, slot) in acc.iter_mut().enumerate() {
                    *slot ^= self.data[r * self.words_per_row + w];
                }
            }
        }
        BitVector::from_words(self.cols, acc)
    }

    /// Matrix times column vector: `self * v`, with `v.len() == cols`.
    ///
    /// This is the syndrome map `s = H * e^T` of the coding layer.
    pub fn mul_vector(&self, v: &BitVector) -> Result<BitVector> {
        if v.len() != self.cols {
            return Err(Error::Length {
                context: "matrix-vector product",
                expected: self.cols,
                actual: v.len(),
            });
        }
        let mut out = BitVector::zeros(self.rows);
        let v_words = v.words();
        for r in 0..self.rows {
            let mut x = 0u32;
            for (w, &vw) in v_words.iter().enumerate() {
                x ^= self.data[r * self.words_per_row + w] & vw;
            }
            if x.count_ones() % 2 == 1 {
                out.set_bit(r);
            }
        }
        Ok(out)
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Result<Self> {
        let mut out = Self::zero(self.cols, self.rows)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.bit(r, c) {
                    out.set_bit(c, r);
                }
            }
        }
        Ok(out)
    }

    /// Horizontal concatenation `(self | right)`.
    pub fn concat_columns(&self, right: &Self) -> Result<Self> {
        if self.rows != right.rows {
            return Err(Error::Length {
                context: "matrix concatenation",
                expected: self.rows,
                actual: right.rows,
            });
        }
        let mut out = Self::zero(self.rows, self.cols + right.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.bit(r, c) {
                    out.set_bit(r, c);
                }
            }
            for c in 0..right.cols {
                if right.bit(r, c) {
                    out.set_bit(r, self.cols + c);
                }
            }
        }
        Ok(out)
    }

    /// Prepends an identity block: `(I | self)`.
    pub fn extend_left_identity(&self) -> Result<Self> {
        Self::identity(self.rows)?.concat_columns(self)
    }

    /// Rank over GF(2), by Gaussian elimination on a working copy.
    pub fn rank(&self) -> usize {
        let mut work = self.clone();
        let mut rank = 0;
        for col in 0..work.cols {
            let Some(pivot) = (rank..work.rows).find(|&r| work.bit(r, col)) else {
                continue;
            };
            work.swap_rows(rank, pivot);
            for r in 0..work.rows {
                if r != rank && work.bit(r, col) {
                    work.xor_row_from(r, rank);
                }
            }
            rank += 1;
            if rank == work.rows {
                break;
            }
        }
        rank
    }

    /// Byte encoding: a 4-byte little-endian signed row count, then the rows
    /// in row-major order, each word little-endian.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len() * 4);
        out.extend_from_slice(&(self.rows as i32).to_le_bytes());
        for word in &self.data {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Decodes a buffer produced by [`BitMatrix::encode`]; the column count
    /// is supplied by the caller (it is not part of the wire format).
    pub fn decode(cols: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::Encoding {
                context: "bit-matrix decoding",
                details: "buffer too short for the row-count prefix",
            });
        }
        let rows = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if rows <= 0 {
            return Err(Error::Encoding {
                context: "bit-matrix decoding",
                details: "row count is not positive",
            });
        }
        let rows = rows as usize;
        let words_per_row = cols.div_ceil(WORD_BITS);
        let expected = 4 + rows * words_per_row * 4;
        if bytes.len() != expected {
            return Err(Error::Length {
                context: "bit-matrix decoding",
                expected,
                actual: bytes.len(),
            });
        }
        let mut out = Self::zero(rows, cols)?;
        for (i, chunk) in bytes[4..].chunks_exact(4).enumerate() {
            out.data[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        // padding bits are part of the invariant, not free storage
        let rem = cols % WORD_BITS;
        if rem != 0 {
            let mask = (1u32 << rem) - 1;
            for r in 0..rows {
                if out.data[r * words_per_row + words_per_row - 1] & !mask != 0 {
                    return Err(Error::Encoding {
                        context: "bit-matrix decoding",
                        details: "padding bits above the column count are set",
                    });
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

impl Zeroize for BitMatrix {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::linear::{BitVector, Permutation};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn identity_is_self_inverse() {
        let id = BitMatrix::identity(10).unwrap();
        assert_eq!(id.compute_inverse().unwrap(), id);
        assert_eq!(id.multiply(&id).unwrap(), id);
    }

    #[test]
    fn inverse_roundtrip_on_random_invertible() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let n = 40;
        loop {
            let a = BitMatrix::random(n, n, &mut rng).unwrap();
            let Ok(inv) = a.compute_inverse() else {
                continue;
            };
            let product = a.multiply(&inv).unwrap();
            assert_eq!(product, BitMatrix::identity(n).unwrap());
            break;
        }
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = BitMatrix::zero(4, 4).unwrap();
        assert!(matches!(
            m.compute_inverse(),
            Err(Error::Arithmetic { .. })
        ));
    }

    #[test]
    fn identity_permutation_fixes_matrix() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let a = BitMatrix::random(6, 37, &mut rng).unwrap();
        let p = Permutation::identity(37);
        assert_eq!(a.right_multiply(&p).unwrap(), a);
    }

    #[test]
    fn zero_vector_maps_to_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let a = BitMatrix::random(16, 16, &mut rng).unwrap();
        let zero = BitVector::zeros(16);
        assert!(a.left_multiply(&zero).unwrap().is_zero());
        assert!(a.mul_vector(&zero).unwrap().is_zero());
    }

    #[test]
    fn column_permutation_moves_columns() {
        let mut a = BitMatrix::zero(2, 3).unwrap();
        a.set_bit(0, 0);
        a.set_bit(1, 2);
        let p = Permutation::from_vec(vec![2, 0, 1]).unwrap();
        let b = a.right_multiply(&p).unwrap();
        // column j of b is column p[j] of a
        assert!(b.bit(1, 0) && b.bit(0, 1) && !b.bit(0, 0));
    }

    #[test]
    fn submatrices_partition_columns() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let a = BitMatrix::random(8, 20, &mut rng).unwrap();
        let left = a.left_sub_matrix().unwrap();
        let right = a.right_sub_matrix().unwrap();
        assert_eq!((left.rows(), left.cols()), (8, 8));
        assert_eq!((right.rows(), right.cols()), (8, 12));
        assert_eq!(left.concat_columns(&right).unwrap(), a);
    }

    #[test]
    fn transpose_involutes() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let a = BitMatrix::random(5, 33, &mut rng).unwrap();
        assert_eq!(a.transpose().unwrap().transpose().unwrap(), a);
    }

    #[test]
    fn vector_products_agree_with_transpose() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let a = BitMatrix::random(7, 12, &mut rng).unwrap();
        let v = BitVector::random(7, &mut rng);
        let via_left = a.left_multiply(&v).unwrap();
        let via_transpose = a.transpose().unwrap().mul_vector(&v).unwrap();
        assert_eq!(via_left, via_transpose);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        for (rows, cols) in [(3usize, 5usize), (8, 32), (10, 70)] {
            let a = BitMatrix::random(rows, cols, &mut rng).unwrap();
            let bytes = a.encode();
            assert_eq!(bytes.len(), 4 + rows * cols.div_ceil(32) * 4);
            assert_eq!(BitMatrix::decode(cols, &bytes).unwrap(), a);
        }
    }

    #[test]
    fn decode_rejects_malformed_buffers() {
        assert!(BitMatrix::decode(8, &[1, 0]).is_err());
        // row count says 1 but no row data follows
        assert!(BitMatrix::decode(8, &[1, 0, 0, 0]).is_err());
        // negative row count
        assert!(BitMatrix::decode(8, &[0xff; 8]).is_err());
        // padding bit set above column 8
        let bad = [1, 0, 0, 0, 0, 1, 0, 0];
        assert!(BitMatrix::decode(8, &bad).is_err());
        let good = [1, 0, 0, 0, 0x80, 0, 0, 0];
        assert!(BitMatrix::decode(8, &good).is_ok());
    }

    #[test]
    fn extend_left_identity_shapes() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let m = BitMatrix::random(4, 9, &mut rng).unwrap();
        let ext = m.extend_left_identity().unwrap();
        assert_eq!((ext.rows(), ext.cols()), (4, 13));
        assert_eq!(ext.left_sub_matrix().unwrap(), BitMatrix::identity(4).unwrap());
        assert_eq!(ext.right_sub_matrix().unwrap(), m);
    }

    #[test]
    fn rank_of_identity_and_zero() {
        assert_eq!(BitMatrix::identity(9).unwrap().rank(), 9);
        assert_eq!(BitMatrix::zero(4, 6).unwrap().rank(), 0);
    }
}
