//! Constants for McEliece/Niederreiter key generation over binary Goppa codes

/// Shape of a binary Goppa code used by McEliece key generation.
///
/// The code length is the full field, n = 2^m; the canonical parity-check
/// matrix has t*m rows and the systematic public key k = n - t*m rows.
pub struct GoppaCodeParams {
    /// Extension degree of the field GF(2^m).
    pub m: usize,

    /// Code length, 2^m.
    pub n: usize,

    /// Degree of the Goppa polynomial; errors correctable per codeword.
    pub t: usize,
}

impl GoppaCodeParams {
    /// Rows of the canonical parity-check matrix.
    pub const fn check_matrix_rows(&self) -> usize {
        self.t * self.m
    }

    /// Dimension of the code, n - t*m.
    pub const fn dimension(&self) -> usize {
        self.n - self.t * self.m
    }
}

/// Goppa code over GF(2^10): n = 1024, t = 50, the original McEliece shape.
pub const GOPPA_1024_50: GoppaCodeParams = GoppaCodeParams {
    m: 10,
    n: 1024,
    t: 50,
};

/// Goppa code over GF(2^11): n = 2048, t = 50.
pub const GOPPA_2048_50: GoppaCodeParams = GoppaCodeParams {
    m: 11,
    n: 2048,
    t: 50,
};
