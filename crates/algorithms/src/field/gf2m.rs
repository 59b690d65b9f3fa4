//! Arithmetic in GF(2^m) for small m
//!
//! Elements are represented as `u32` bit patterns: bit k is the coefficient
//! of X^k of the residue modulo a fixed degree-m polynomial. Multiplication
//! and inversion go through exponent/logarithm tables built at construction
//! time by iterating the generator X, so the defining polynomial must be
//! primitive; every entry of the default table is. Memory for the tables is
//! 2^(m+3) bytes, which is why the upper bound on m matters.

use core::fmt;

use rand::{CryptoRng, RngCore};
use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::error::{Error, Result};

/// Smallest supported extension degree.
pub const MIN_DEGREE: usize = 2;
/// Largest supported extension degree.
pub const MAX_DEGREE: usize = 31;

/// Primitive polynomials over GF(2), indexed by degree - MIN_DEGREE.
/// Bit k of each entry is the coefficient of X^k. All are maximal-length
/// LFSR polynomials (or reciprocals thereof), so X generates the full
/// multiplicative group.
const DEFAULT_POLYNOMIALS: [u32; MAX_DEGREE - MIN_DEGREE + 1] = [
    7,          // m = 2:  x^2 + x + 1
    11,         // m = 3:  x^3 + x + 1
    19,         // m = 4:  x^4 + x + 1
    37,         // m = 5:  x^5 + x^2 + 1
    67,         // m = 6:  x^6 + x + 1
    131,        // m = 7:  x^7 + x + 1
    285,        // m = 8:  x^8 + x^4 + x^3 + x^2 + 1
    529,        // m = 9:  x^9 + x^4 + 1
    1033,       // m = 10: x^10 + x^3 + 1
    2053,       // m = 11: x^11 + x^2 + 1
    4179,       // m = 12: x^12 + x^6 + x^4 + x + 1
    8219,       // m = 13: x^13 + x^4 + x^3 + x + 1
    16427,      // m = 14: x^14 + x^5 + x^3 + x + 1
    32771,      // m = 15: x^15 + x + 1
    69643,      // m = 16: x^16 + x^12 + x^3 + x + 1
    131081,     // m = 17: x^17 + x^3 + 1
    262273,     // m = 18: x^18 + x^7 + 1
    524359,     // m = 19: x^19 + x^6 + x^2 + x + 1
    1048585,    // m = 20: x^20 + x^3 + 1
    2097157,    // m = 21: x^21 + x^2 + 1
    4194307,    // m = 22: x^22 + x + 1
    8388641,    // m = 23: x^23 + x^5 + 1
    16777351,   // m = 24: x^24 + x^7 + x^2 + x + 1
    33554441,   // m = 25: x^25 + x^3 + 1
    67108935,   // m = 26: x^26 + x^6 + x^2 + x + 1
    134217767,  // m = 27: x^27 + x^5 + x^2 + x + 1
    268435465,  // m = 28: x^28 + x^3 + 1
    536870917,  // m = 29: x^29 + x^2 + 1
    1073741907, // m = 30: x^30 + x^6 + x^4 + x + 1
    2147483657, // m = 31: x^31 + x^3 + 1
];

/// Returns the default primitive polynomial for GF(2^m).
pub fn default_polynomial(degree: usize) -> Result<u32> {
    if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
        return Err(Error::Config {
            context: "field construction",
            message: format!(
                "extension degree must be in [{}, {}], got {}",
                MIN_DEGREE, MAX_DEGREE, degree
            ),
        });
    }
    Ok(DEFAULT_POLYNOMIALS[degree - MIN_DEGREE])
}

/// The finite field GF(2^m), immutable after construction.
///
/// Two fields are equal iff their degree and defining polynomial match; the
/// derived tables are excluded from comparison.
#[derive(Clone)]
pub struct Gf2mField {
    degree: usize,
    polynomial: u32,
    exp: Vec<u32>,
    log: Vec<u32>,
}

impl Gf2mField {
    /// Creates GF(2^m) with the default primitive polynomial for `degree`.
    pub fn new(degree: usize) -> Result<Self> {
        let polynomial = default_polynomial(degree)?;
        Self::with_polynomial(degree, polynomial)
    }

    /// Creates GF(2^m) defined by a caller-supplied polynomial.
    ///
    /// The polynomial must have degree exactly `degree`, be irreducible over
    /// GF(2), and be primitive (X must generate the multiplicative group;
    /// the exponent-table construction requires it).
    pub fn with_polynomial(degree: usize, polynomial: u32) -> Result<Self> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(Error::Config {
                context: "field construction",
                message: format!(
                    "extension degree must be in [{}, {}], got {}",
                    MIN_DEGREE, MAX_DEGREE, degree
                ),
            });
        }
        if gf2::degree(polynomial as u64) != degree as i32 {
            return Err(Error::Config {
                context: "field construction",
                message: format!(
                    "degree of {:#x} does not match field degree {}",
                    polynomial, degree
                ),
            });
        }
        if !gf2::is_irreducible(polynomial as u64) {
            return Err(Error::Config {
                context: "field construction",
                message: format!("{:#x} is reducible over GF(2)", polynomial),
            });
        }
        let (exp, log) = Self::build_tables(degree, polynomial)?;
        Ok(Self {
            degree,
            polynomial,
            exp,
            log,
        })
    }

    /// Builds the exponent and logarithm tables by iterating the generator X.
    ///
    /// `exp[k] = X^k mod polynomial` and `log[exp[k]] = k`. The final entry
    /// `exp[2^m - 1]` wraps around to 1. A repeated value before the full
    /// period means X does not generate the group.
    fn build_tables(degree: usize, polynomial: u32) -> Result<(Vec<u32>, Vec<u32>)> {
        let size = 1usize << degree;
        let top_bit = 1u32 << degree;
        let mut exp = vec![0u32; size];
        let mut log = vec![0u32; size];
        let mut seen = vec![false; size];

        let mut x = 1u32;
        for k in 0..size - 1 {
            if seen[x as usize] {
                return Err(Error::Config {
                    context: "field construction",
                    message: format!("{:#x} is irreducible but not primitive", polynomial),
                });
            }
            seen[x as usize] = true;
            exp[k] = x;
            log[x as usize] = k as u32;
            // multiply by X modulo the defining polynomial
            x <<= 1;
            if x & top_bit != 0 {
                x ^= polynomial;
            }
        }
        exp[size - 1] = 1;
        Ok((exp, log))
    }

    /// The extension degree m.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The defining polynomial, bit k holding the coefficient of X^k.
    pub fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// Number of field elements, 2^m.
    pub fn size(&self) -> usize {
        1usize << self.degree
    }

    /// Whether `x` is a valid element of this field.
    pub fn is_element(&self, x: u32) -> bool {
        x < (1u32 << self.degree)
    }

    /// Addition, which over characteristic 2 is XOR (and equals subtraction).
    #[inline]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        debug_assert!(self.is_element(a) && self.is_element(b));
        a ^ b
    }

    /// Multiplication via the exponent/logarithm tables.
    ///
    /// The zero operand is handled by a branch-free select so the table
    /// lookups execute unconditionally.
    pub fn mult(&self, a: u32, b: u32) -> u32 {
        debug_assert!(self.is_element(a) && self.is_element(b));
        let order = (1u32 << self.degree) - 1;
        let idx = (self.log[a as usize] + self.log[b as usize]) % order;
        let product = self.exp[idx as usize];
        let either_zero = a.ct_eq(&0) | b.ct_eq(&0);
        u32::conditional_select(&product, &0, either_zero)
    }

    /// Squaring, `a * a`.
    #[inline]
    pub fn square(&self, a: u32) -> u32 {
        self.mult(a, a)
    }

    /// Multiplicative inverse. Fails on the zero element.
    pub fn inverse(&self, a: u32) -> Result<u32> {
        debug_assert!(self.is_element(a));
        if a == 0 {
            return Err(Error::Arithmetic {
                operation: "field inversion",
                details: "the zero element has no inverse",
            });
        }
        let order = (1u32 << self.degree) - 1;
        Ok(self.exp[((order - self.log[a as usize]) % order) as usize])
    }

    /// Exponentiation by square-and-multiply. `pow(a, 0) == 1` for every a.
    pub fn pow(&self, a: u32, k: u32) -> u32 {
        debug_assert!(self.is_element(a));
        let mut result = 1u32;
        let mut base = a;
        let mut e = k;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mult(result, base);
            }
            base = self.mult(base, base);
            e >>= 1;
        }
        result
    }

    /// The unique square root, `a^(2^(m-1))`.
    ///
    /// Squaring is a bijection of GF(2^m), so every element has exactly one
    /// root and `sq_root(square(a)) == a`.
    pub fn sq_root(&self, a: u32) -> u32 {
        debug_assert!(self.is_element(a));
        let mut r = a;
        for _ in 1..self.degree {
            r = self.mult(r, r);
        }
        r
    }

    /// Solves `z^2 + z = c`.
    ///
    /// The map z -> z^2 + z is GF(2)-linear, so the equation reduces to an
    /// m x m linear system over GF(2). A solution exists iff c lies in the
    /// image (equivalently, Tr(c) = 0); `z` and `z + 1` are then the two
    /// roots and the one with the free coordinate cleared is returned.
    pub fn solve_quadratic(&self, c: u32) -> Result<u32> {
        debug_assert!(self.is_element(c));
        let m = self.degree;

        // Column j is the image of the basis element X^j; row i of the
        // augmented system packs the matrix bits in [0, m) and c's bit i
        // at position m.
        let mut rows = vec![0u64; m];
        for j in 0..m {
            let e = 1u32 << j;
            let image = self.mult(e, e) ^ e;
            for (i, row) in rows.iter_mut().enumerate() {
                *row |= (((image >> i) & 1) as u64) << j;
            }
        }
        for (i, row) in rows.iter_mut().enumerate() {
            *row |= (((c >> i) & 1) as u64) << m;
        }

        // Gauss-Jordan elimination
        let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(m);
        let mut next_row = 0;
        for col in 0..m {
            let Some(pivot_row) = (next_row..m).find(|&i| (rows[i] >> col) & 1 == 1) else {
                continue;
            };
            rows.swap(next_row, pivot_row);
            for i in 0..m {
                if i != next_row && (rows[i] >> col) & 1 == 1 {
                    rows[i] ^= rows[next_row];
                }
            }
            pivots.push((next_row, col));
            next_row += 1;
        }
        // A zero row with a set right-hand side marks an inconsistent system
        for row in rows.iter().skip(next_row) {
            if (row >> m) & 1 == 1 {
                return Err(Error::Arithmetic {
                    operation: "quadratic equation",
                    details: "z^2 + z = c has no solution (trace of c is one)",
                });
            }
        }

        let mut z = 0u32;
        for (row, col) in pivots {
            z |= (((rows[row] >> m) & 1) as u32) << col;
        }
        Ok(z)
    }

    /// Samples a uniform field element.
    pub fn random_element<R: CryptoRng + RngCore>(&self, rng: &mut R) -> u32 {
        rng.next_u32() & ((1u32 << self.degree) - 1)
    }

    /// Samples a uniform nonzero field element.
    pub fn random_nonzero_element<R: CryptoRng + RngCore>(&self, rng: &mut R) -> u32 {
        loop {
            let x = self.random_element(rng);
            if x != 0 {
                return x;
            }
        }
    }
}

impl PartialEq for Gf2mField {
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree && self.polynomial == other.polynomial
    }
}

impl Eq for Gf2mField {}

impl fmt::Debug for Gf2mField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gf2mField")
            .field("degree", &self.degree)
            .field("polynomial", &format_args!("{:#x}", self.polynomial))
            .finish()
    }
}

impl fmt::Display for Gf2mField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(2^{})", self.degree)
    }
}

/// Word-packed polynomial arithmetic over GF(2), used only to vet defining
/// polynomials at construction time.
mod gf2 {
    /// Degree of the bit-packed polynomial, -1 for zero.
    pub(super) fn degree(p: u64) -> i32 {
        63 - p.leading_zeros() as i32
    }

    fn modulo(mut a: u64, p: u64) -> u64 {
        let dp = degree(p);
        while degree(a) >= dp {
            a ^= p << (degree(a) - dp);
        }
        a
    }

    fn mulmod(a: u64, mut b: u64, p: u64) -> u64 {
        let dp = degree(p);
        let mut shifted = a;
        let mut acc = 0u64;
        while b != 0 {
            if b & 1 == 1 {
                acc ^= shifted;
            }
            b >>= 1;
            shifted <<= 1;
            if degree(shifted) == dp {
                shifted ^= p;
            }
        }
        acc
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            let r = modulo(a, b);
            a = b;
            b = r;
        }
        a
    }

    /// Irreducibility over GF(2): p of degree d is irreducible iff
    /// gcd(X^(2^i) + X, p) is constant for every i in [1, d/2].
    pub(super) fn is_irreducible(p: u64) -> bool {
        let d = degree(p);
        if d < 1 {
            return false;
        }
        if d == 1 {
            return true;
        }
        if p & 1 == 0 {
            // divisible by X
            return false;
        }
        let mut u = 2u64; // X
        for _ in 1..=(d / 2) {
            u = mulmod(u, u, p);
            if degree(gcd(u ^ 2, p)) > 0 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn gf8_known_values() {
        // GF(8) with x^3 + x + 1 (bit pattern 0b1011)
        let field = Gf2mField::with_polynomial(3, 11).unwrap();
        assert_eq!(field.mult(3, 5), 4);
        assert_eq!(field.inverse(3).unwrap(), 6);
        // 3^2 = 5 and 6^2 = 2, so the roots go the other way
        assert_eq!(field.sq_root(5), 3);
        assert_eq!(field.sq_root(2), 6);
    }

    #[test]
    fn add_is_xor_and_self_inverse() {
        let field = Gf2mField::new(4).unwrap();
        for a in 0..16u32 {
            assert_eq!(field.add(a, a), 0);
            for b in 0..16u32 {
                assert_eq!(field.add(a, b), a ^ b);
            }
        }
    }

    #[test]
    fn mult_commutes_and_inverts() {
        for m in [3usize, 4, 8] {
            let field = Gf2mField::new(m).unwrap();
            for a in 0..field.size() as u32 {
                for b in 0..field.size() as u32 {
                    assert_eq!(field.mult(a, b), field.mult(b, a));
                }
                if a != 0 {
                    let inv = field.inverse(a).unwrap();
                    assert_eq!(field.mult(a, inv), 1, "a = {} in GF(2^{})", a, m);
                }
            }
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        let field = Gf2mField::new(8).unwrap();
        assert!(field.inverse(0).is_err());
    }

    #[test]
    fn square_root_inverts_squaring() {
        let field = Gf2mField::new(8).unwrap();
        for a in 0..256u32 {
            assert_eq!(field.sq_root(field.square(a)), a);
        }
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        let field = Gf2mField::new(5).unwrap();
        for a in 0..32u32 {
            let mut acc = 1u32;
            for k in 0..10u32 {
                assert_eq!(field.pow(a, k), acc);
                acc = field.mult(acc, a);
            }
        }
    }

    #[test]
    fn quadratic_solver_roundtrip() {
        let field = Gf2mField::new(6).unwrap();
        for z in 0..64u32 {
            let c = field.square(z) ^ z;
            let solved = field.solve_quadratic(c).unwrap();
            // z and z + 1 are the two roots of the same equation
            assert!(solved == z || solved == (z ^ 1));
            assert_eq!(field.square(solved) ^ solved, c);
        }
    }

    #[test]
    fn quadratic_solver_rejects_trace_one() {
        let field = Gf2mField::new(4).unwrap();
        let solvable: Vec<u32> = (0..16u32).map(|z| field.square(z) ^ z).collect();
        for c in 0..16u32 {
            let result = field.solve_quadratic(c);
            if solvable.contains(&c) {
                assert!(result.is_ok());
            } else {
                assert!(result.is_err());
            }
        }
    }

    #[test]
    fn default_table_covers_all_degrees() {
        // Larger degrees allocate multi-megabyte tables; the cheap range
        // is enough to exercise every code path.
        for m in MIN_DEGREE..=16 {
            let field = Gf2mField::new(m).unwrap();
            assert_eq!(field.degree(), m);
            assert_eq!(field.size(), 1 << m);
        }
    }

    #[test]
    fn rejects_out_of_range_degree() {
        assert!(Gf2mField::new(1).is_err());
        assert!(Gf2mField::new(32).is_err());
        assert!(default_polynomial(0).is_err());
    }

    #[test]
    fn rejects_reducible_polynomial() {
        // x^3 + 1 = (x + 1)(x^2 + x + 1)
        assert!(Gf2mField::with_polynomial(3, 0b1001).is_err());
        // x^4 + x^3 + x^2 + x + 1 is irreducible but X has order 5, not 15
        assert!(Gf2mField::with_polynomial(4, 0b11111).is_err());
    }

    #[test]
    fn random_elements_stay_in_field() {
        let field = Gf2mField::new(9).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(field.is_element(field.random_element(&mut rng)));
            assert_ne!(field.random_nonzero_element(&mut rng), 0);
        }
    }

    #[test]
    fn field_equality_is_by_degree_and_polynomial() {
        let a = Gf2mField::new(4).unwrap();
        let b = Gf2mField::new(4).unwrap();
        let c = Gf2mField::new(5).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
