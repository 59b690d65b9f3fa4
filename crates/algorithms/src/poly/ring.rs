//! Squaring and square-root matrices for GF(2^m)[X]/(g)
//!
//! Patterson decoding takes one modular square root per decode. Instead of
//! running the fixed-point iteration every time, the quotient ring
//! precomputes the matrix of the (linear) squaring map and its inverse once
//! per Goppa polynomial; the decoder then applies
//! [`Gf2mPoly::mod_square_root_matrix`] against the inverse.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::Gf2mField;
use crate::poly::Gf2mPoly;

/// Precomputed squaring and square-root matrices over GF(2^m)[X]/(g).
///
/// Column j of the squaring matrix is `(X^j)^2 mod g`; the square-root
/// matrix is its inverse under the field-coefficient matrix product, so
/// squaring followed by the matrix square root is the identity on the
/// quotient ring, and vice versa.
#[derive(Clone, Debug)]
pub struct SquareRootRing {
    field: Arc<Gf2mField>,
    modulus: Gf2mPoly,
    squaring: Vec<Gf2mPoly>,
    square_root: Vec<Gf2mPoly>,
}

impl SquareRootRing {
    /// Builds both matrices for the quotient ring modulo `modulus`.
    ///
    /// The modulus is normalized monic first. Fails when the squaring map is
    /// not invertible, which happens exactly when the modulus is not
    /// squarefree.
    pub fn new(field: Arc<Gf2mField>, modulus: &Gf2mPoly) -> Result<Self> {
        if modulus.degree() < 1 {
            return Err(Error::param(
                "modulus",
                "quotient-ring modulus must have positive degree",
            ));
        }
        let modulus = modulus.make_monic()?;
        let t = modulus.degree() as usize;

        let mut squaring = Vec::with_capacity(t);
        for j in 0..t {
            squaring.push(Gf2mPoly::monomial(field.clone(), 2 * j).rem(&modulus)?);
        }

        // The squaring matrix with entries over the field: (i, j) holds the
        // coefficient of X^i in column j. Gauss-Jordan with field arithmetic
        // produces the inverse.
        let mut work = vec![vec![0u32; t]; t];
        for (j, column) in squaring.iter().enumerate() {
            for (i, row) in work.iter_mut().enumerate() {
                row[j] = column.coefficient(i);
            }
        }
        let mut inverse = vec![vec![0u32; t]; t];
        for (i, row) in inverse.iter_mut().enumerate() {
            row[i] = 1;
        }

        for col in 0..t {
            let Some(pivot) = (col..t).find(|&r| work[r][col] != 0) else {
                return Err(Error::Arithmetic {
                    operation: "square-root matrix construction",
                    details: "squaring matrix is singular (modulus is not squarefree)",
                });
            };
            work.swap(col, pivot);
            inverse.swap(col, pivot);

            let scale = field.inverse(work[col][col])?;
            for j in 0..t {
                work[col][j] = field.mult(work[col][j], scale);
                inverse[col][j] = field.mult(inverse[col][j], scale);
            }
            for r in 0..t {
                if r != col && work[r][col] != 0 {
                    let factor = work[r][col];
                    for j in 0..t {
                        let w = field.mult(factor, work[col][j]);
                        let v = field.mult(factor, inverse[col][j]);
                        work[r][j] ^= w;
                        inverse[r][j] ^= v;
                    }
                }
            }
        }

        let mut square_root = Vec::with_capacity(t);
        for j in 0..t {
            let coeffs: Vec<u32> = (0..t).map(|i| inverse[i][j]).collect();
            square_root.push(Gf2mPoly::from_coeffs(field.clone(), &coeffs)?);
        }

        Ok(Self {
            field,
            modulus,
            squaring,
            square_root,
        })
    }

    /// The coefficient field.
    pub fn field(&self) -> &Arc<Gf2mField> {
        &self.field
    }

    /// The (monic) modulus of the quotient ring.
    pub fn modulus(&self) -> &Gf2mPoly {
        &self.modulus
    }

    /// Columns of the squaring matrix: `(X^j)^2 mod g`.
    pub fn squaring_matrix(&self) -> &[Gf2mPoly] {
        &self.squaring
    }

    /// Columns of the inverse (square-root) matrix.
    pub fn square_root_matrix(&self) -> &[Gf2mPoly] {
        &self.square_root
    }

    /// Squares an element of the quotient ring.
    pub fn square(&self, p: &Gf2mPoly) -> Result<Gf2mPoly> {
        p.mod_multiply(p, &self.modulus)
    }

    /// Square root of an element via the precomputed matrix.
    pub fn square_root(&self, p: &Gf2mPoly) -> Gf2mPoly {
        p.mod_square_root_matrix(&self.square_root)
    }
}
