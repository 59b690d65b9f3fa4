//! Binary Goppa codes
//!
//! A monic polynomial g of degree t over GF(2^m), irreducible in the cases
//! of interest, defines a binary Goppa code of length n = 2^m with designed
//! minimum distance 2t + 1. This module builds the canonical t*m x n
//! parity-check matrix over GF(2), reduces it to systematic form under a
//! random column permutation, and decodes syndromes with Patterson's
//! algorithm. The code support is the whole field in natural order: column
//! j of the check matrix corresponds to the field element j.

use std::sync::Arc;

use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::field::Gf2mField;
use crate::linear::{BitMatrix, BitVector, Permutation};
use crate::poly::{Gf2mPoly, SquareRootRing};

/// The systematic reduction of a check matrix: S * H * P = (I | M).
///
/// Holds the *inverse* of the row operation (the left t*m block of H * P),
/// the right block M, and the column permutation P.
#[derive(Clone, Debug)]
pub struct SystematicForm {
    /// Left t*m x t*m block of the permuted check matrix; the inverse of
    /// the row transformation S.
    pub s_inv: BitMatrix,
    /// The non-identity block M of the systematic matrix (I | M).
    pub m: BitMatrix,
    /// The column permutation P.
    pub p: Permutation,
}

/// A systematic generator matrix together with the column index set on
/// which it restricts to the identity.
#[derive(Clone, Debug)]
pub struct GeneratorSet {
    /// The k x n generator matrix (M^T | I).
    pub matrix: BitMatrix,
    /// Support indices J (in unpermuted column coordinates) carrying the
    /// identity block.
    pub support: Vec<usize>,
}

/// Builds the canonical parity-check matrix of the Goppa code defined by
/// `g` over `field`.
///
/// The construction follows the classical three steps: the column recurrence
/// `YZ[0][j] = g(j)^-1`, `YZ[i][j] = j * YZ[i-1][j]`; multiplication by the
/// upper-triangular band of g's coefficients; and expansion of every field
/// element into m rows over GF(2), least significant coefficient bit to the
/// highest row of the block.
///
/// Fails when g has a root in the field (then g(j) is not invertible); an
/// irreducible g never does.
pub fn parity_check_matrix(field: &Arc<Gf2mField>, g: &Gf2mPoly) -> Result<BitMatrix> {
    if field != g.field() {
        return Err(Error::param(
            "goppa polynomial",
            "polynomial is defined over a different field",
        ));
    }
    let t = g.degree();
    if t < 1 {
        return Err(Error::param(
            "goppa polynomial",
            "degree must be positive",
        ));
    }
    let t = t as usize;
    let m = field.degree();
    let n = 1usize << m;

    // yz[i][j] = j^i / g(j)
    let mut yz = vec![vec![0u32; n]; t];
    for j in 0..n {
        let gj = g.evaluate_at(j as u32);
        yz[0][j] = field.inverse(gj).map_err(|_| Error::Arithmetic {
            operation: "canonical check matrix",
            details: "goppa polynomial has a root in the field",
        })?;
    }
    for i in 1..t {
        for j in 0..n {
            yz[i][j] = field.mult(yz[i - 1][j], j as u32);
        }
    }

    // h[i][j] = sum_{k=0..i} yz[k][j] * g_{t+k-i}
    let mut h = vec![vec![0u32; n]; t];
    for i in 0..t {
        for j in 0..n {
            let mut acc = 0u32;
            for (k, yz_row) in yz.iter().enumerate().take(i + 1) {
                acc ^= field.mult(yz_row[j], g.coefficient(t + k - i));
            }
            h[i][j] = acc;
        }
    }

    // expand each field element into m binary rows
    let mut out = BitMatrix::zero(t * m, n)?;
    for (i, h_row) in h.iter().enumerate() {
        for (j, &e) in h_row.iter().enumerate() {
            for u in 0..m {
                if (e >> u) & 1 == 1 {
                    out.set_bit((i + 1) * m - u - 1, j);
                }
            }
        }
    }
    Ok(out)
}

/// Reduces a full-rank check matrix to systematic form.
///
/// Samples random column permutations until the left t*m block of H * P is
/// invertible; the expected number of attempts is a small constant. The
/// loop is unbounded, so a matrix without full row rank never returns.
pub fn systematic_form<R: CryptoRng + RngCore>(
    h: &BitMatrix,
    rng: &mut R,
) -> Result<SystematicForm> {
    loop {
        let p = Permutation::random(h.cols(), rng);
        let hp = h.right_multiply(&p)?;
        let s_inv = hp.left_sub_matrix()?;
        match s_inv.compute_inverse() {
            Ok(s) => {
                let sh = s.multiply(&hp)?;
                let m = sh.right_sub_matrix()?;
                return Ok(SystematicForm { s_inv, m, p });
            }
            // singular left block: resample the permutation
            Err(Error::Arithmetic { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Derives the systematic generator matrix G = (M^T | I) and its identity
/// column set from a systematic form.
///
/// G * (S*H*P)^T = M^T + M^T = 0, so the rows of G span the code in the
/// permuted coordinates; `support` maps the identity columns back through P.
pub fn generator_set(sf: &SystematicForm) -> Result<GeneratorSet> {
    let mt = sf.m.transpose()?;
    let k = mt.rows();
    let matrix = mt.concat_columns(&BitMatrix::identity(k)?)?;
    let tm = sf.m.rows();
    let support = (0..k).map(|i| sf.p.get(tm + i)).collect();
    Ok(GeneratorSet { matrix, support })
}

/// Patterson syndrome decoding.
///
/// Maps a t*m-bit syndrome to the unique error vector of weight at most t
/// that produced it:
///
/// 1. the zero syndrome short-circuits to the zero error vector;
/// 2. the syndrome bits become the syndrome polynomial S in GF(2^m)[X]/(g);
/// 3. T = S^-1 mod g, tau = sqrt(T + X) via the precomputed matrix;
/// 4. rational reconstruction splits tau into (a, b) with b*tau = a (mod g);
/// 5. sigma = a^2 + X*b^2, normalized monic, is the error locator: its
///    roots in the field are exactly the error positions.
///
/// A syndrome whose polynomial is not invertible modulo g does not belong
/// to the code and surfaces a decoding error.
pub fn syndrome_decode(
    syndrome: &BitVector,
    field: &Arc<Gf2mField>,
    g: &Gf2mPoly,
    ring: &SquareRootRing,
) -> Result<BitVector> {
    let t = g.degree();
    if t < 1 {
        return Err(Error::param("goppa polynomial", "degree must be positive"));
    }
    if ring.modulus() != g {
        return Err(Error::param(
            "square-root ring",
            "ring modulus does not match the goppa polynomial",
        ));
    }
    let m = field.degree();
    let n = 1usize << m;
    if syndrome.len() != t as usize * m {
        return Err(Error::Length {
            context: "syndrome decoding",
            expected: t as usize * m,
            actual: syndrome.len(),
        });
    }

    let mut errors = BitVector::zeros(n);
    if syndrome.is_zero() {
        return Ok(errors);
    }

    let s_poly = Gf2mPoly::from_field_vector(&syndrome.to_field_vector(field)?);
    let t_poly = s_poly.mod_inverse(g).map_err(|_| Error::Decoding {
        context: "syndrome polynomial is not invertible modulo the goppa polynomial",
    })?;

    let x = Gf2mPoly::monomial(field.clone(), 1);
    let z = t_poly.add(&x).rem(g)?;
    let tau = z.mod_square_root_matrix(ring.square_root_matrix());

    let (a, b) = tau.mod_polynomial_to_fraction(g)?;
    let sigma = a
        .multiply(&a)
        .add(&b.multiply(&b).mult_with_monomial(1));
    let sigma = sigma.make_monic().map_err(|_| Error::Decoding {
        context: "error-locator polynomial degenerated to zero",
    })?;

    for j in 0..n {
        if sigma.evaluate_at(j as u32) == 0 {
            errors.set_bit(j);
        }
    }
    Ok(errors)
}
