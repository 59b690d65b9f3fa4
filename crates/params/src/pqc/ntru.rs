//! Parameters for the NTRUEncrypt key generation and encryption buffers
//!
//! A parameter block carries the primary inputs of a named NTRU parameter
//! set together with the quantities derived from them. The derived fields
//! are recomputed on every construction, so equality over primaries implies
//! equality over the whole block. Serialization is canonical: fixed-width
//! little-endian integers with one-byte flags and length-prefixed variable
//! parts, stable across platforms.

use std::hash::{Hash, Hasher};

use pqcore_api::{Digest, Error, Result};

/// Shape of the private polynomials: a single ternary polynomial or the
/// product form f = f1*f2 + f3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NtruPolyType {
    /// One ternary polynomial with df nonzero coefficients of each sign.
    Simple,
    /// Product form with weights df1, df2, df3.
    Product,
}

impl NtruPolyType {
    fn to_i32(self) -> i32 {
        match self {
            NtruPolyType::Simple => 0,
            NtruPolyType::Product => 1,
        }
    }

    fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(NtruPolyType::Simple),
            1 => Ok(NtruPolyType::Product),
            _ => Err(Error::Config {
                context: "NTRU parameter decoding",
                message: format!("unknown polynomial type {}", value),
            }),
        }
    }
}

/// An NTRUEncrypt key-generation parameter block.
///
/// Primary inputs follow the named parameter sets; everything in the
/// "derived" group is a pure function of them. The digest is owned by the
/// block and contributes only its algorithm name to equality, hashing and
/// serialization.
#[derive(Clone)]
pub struct NtruEncryptParams {
    /// Ring dimension N.
    pub n: i32,
    /// The big modulus q.
    pub q: i32,
    /// Private-polynomial weight (SIMPLE shape; 0 for PRODUCT).
    pub df: i32,
    /// Product-form weight of f1 (0 for SIMPLE).
    pub df1: i32,
    /// Product-form weight of f2 (0 for SIMPLE).
    pub df2: i32,
    /// Product-form weight of f3 (0 for SIMPLE).
    pub df3: i32,
    /// Minimum acceptable number of -1, 0 and 1 coefficients in a message
    /// representative.
    pub dm0: i32,
    /// Number of random bits prepended to the message, a multiple of 8.
    pub db: i32,
    /// Bit length of candidate indices in index generation.
    pub c: i32,
    /// Minimum number of hash calls for blinding-polynomial generation.
    pub min_calls_r: i32,
    /// Minimum number of hash calls for mask generation.
    pub min_calls_mask: i32,
    /// Whether the hash of the seed is used instead of the seed itself.
    pub hash_seed: bool,
    /// Object identifier of the parameter set, three or more bytes.
    pub oid: Vec<u8>,
    /// Whether ternary polynomials use the sparse representation.
    pub sparse: bool,
    /// Whether f is of the form 1 + 3F with fast inversion.
    pub fast_fp: bool,
    /// Shape of the private polynomials.
    pub poly_type: NtruPolyType,

    // derived quantities
    /// Blinding-polynomial weight (SIMPLE shape).
    pub dr: i32,
    /// Product-form blinding weight 1.
    pub dr1: i32,
    /// Product-form blinding weight 2.
    pub dr2: i32,
    /// Product-form blinding weight 3.
    pub dr3: i32,
    /// Weight of the polynomial g, floor(N/3).
    pub dg: i32,
    /// Length-field size in bytes.
    pub llen: i32,
    /// Maximum plaintext length in bytes.
    pub max_msg_len_bytes: i32,
    /// Encryption bit-buffer size.
    pub buffer_len_bits: i32,
    /// Encryption trit-buffer size.
    pub buffer_len_trits: i32,
    /// Public-key blinding length in bits.
    pub pk_len: i32,

    digest: Box<dyn Digest>,
}

impl NtruEncryptParams {
    /// Builds a SIMPLE-shape parameter block and derives the dependent
    /// quantities.
    #[allow(clippy::too_many_arguments)]
    pub fn new_simple(
        n: i32,
        q: i32,
        df: i32,
        dm0: i32,
        db: i32,
        c: i32,
        min_calls_r: i32,
        min_calls_mask: i32,
        hash_seed: bool,
        oid: Vec<u8>,
        sparse: bool,
        fast_fp: bool,
        digest: Box<dyn Digest>,
    ) -> Self {
        let mut params = Self {
            n,
            q,
            df,
            df1: 0,
            df2: 0,
            df3: 0,
            dm0,
            db,
            c,
            min_calls_r,
            min_calls_mask,
            hash_seed,
            oid,
            sparse,
            fast_fp,
            poly_type: NtruPolyType::Simple,
            dr: 0,
            dr1: 0,
            dr2: 0,
            dr3: 0,
            dg: 0,
            llen: 0,
            max_msg_len_bytes: 0,
            buffer_len_bits: 0,
            buffer_len_trits: 0,
            pk_len: 0,
            digest,
        };
        params.derive();
        params
    }

    /// Builds a PRODUCT-shape parameter block (f = f1*f2 + f3) and derives
    /// the dependent quantities.
    #[allow(clippy::too_many_arguments)]
    pub fn new_product(
        n: i32,
        q: i32,
        df1: i32,
        df2: i32,
        df3: i32,
        dm0: i32,
        db: i32,
        c: i32,
        min_calls_r: i32,
        min_calls_mask: i32,
        hash_seed: bool,
        oid: Vec<u8>,
        sparse: bool,
        fast_fp: bool,
        digest: Box<dyn Digest>,
    ) -> Self {
        let mut params = Self {
            n,
            q,
            df: 0,
            df1,
            df2,
            df3,
            dm0,
            db,
            c,
            min_calls_r,
            min_calls_mask,
            hash_seed,
            oid,
            sparse,
            fast_fp,
            poly_type: NtruPolyType::Product,
            dr: 0,
            dr1: 0,
            dr2: 0,
            dr3: 0,
            dg: 0,
            llen: 0,
            max_msg_len_bytes: 0,
            buffer_len_bits: 0,
            buffer_len_trits: 0,
            pk_len: 0,
            digest,
        };
        params.derive();
        params
    }

    /// Recomputes every derived field from the primary inputs.
    fn derive(&mut self) {
        match self.poly_type {
            NtruPolyType::Simple => {
                self.dr = self.df;
                self.dr1 = 0;
                self.dr2 = 0;
                self.dr3 = 0;
            }
            NtruPolyType::Product => {
                self.dr = 0;
                self.dr1 = self.df1;
                self.dr2 = self.df2;
                self.dr3 = self.df3;
            }
        }
        self.dg = self.n / 3;
        self.llen = 1;
        self.max_msg_len_bytes = self.n * 3 / 2 / 8 - self.llen - self.db / 8 - 1;
        self.buffer_len_bits = (self.n * 3 / 2 + 7) / 8 * 8 + 1;
        self.buffer_len_trits = self.n - 1;
        self.pk_len = self.db;
    }

    /// The owned digest collaborator.
    pub fn digest(&self) -> &dyn Digest {
        self.digest.as_ref()
    }

    /// The digest algorithm name carried by serialization.
    pub fn digest_name(&self) -> &'static str {
        self.digest.algorithm_name()
    }

    /// Canonical serialization.
    ///
    /// Little-endian i32 for N, q, df, df1, df2, df3, db, dm0, c,
    /// minCallsR and minCallsMask, then one byte each for hashSeed, the
    /// oid length prefix and bytes, sparse and fastFp, the polynomial type
    /// as i32, and the length-prefixed digest algorithm name.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        for value in [
            self.n,
            self.q,
            self.df,
            self.df1,
            self.df2,
            self.df3,
            self.db,
            self.dm0,
            self.c,
            self.min_calls_r,
            self.min_calls_mask,
        ] {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out.push(self.hash_seed as u8);
        out.push(self.oid.len() as u8);
        out.extend_from_slice(&self.oid);
        out.push(self.sparse as u8);
        out.push(self.fast_fp as u8);
        out.extend_from_slice(&self.poly_type.to_i32().to_le_bytes());
        let name = self.digest.algorithm_name().as_bytes();
        out.push(name.len() as u8);
        out.extend_from_slice(name);
        out
    }

    /// Deserialization; `digest_factory` maps the stored algorithm name
    /// back to a digest instance.
    pub fn from_bytes<F>(bytes: &[u8], digest_factory: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<Box<dyn Digest>>,
    {
        let mut reader = Reader::new(bytes);
        let n = reader.read_i32()?;
        let q = reader.read_i32()?;
        let df = reader.read_i32()?;
        let df1 = reader.read_i32()?;
        let df2 = reader.read_i32()?;
        let df3 = reader.read_i32()?;
        let db = reader.read_i32()?;
        let dm0 = reader.read_i32()?;
        let c = reader.read_i32()?;
        let min_calls_r = reader.read_i32()?;
        let min_calls_mask = reader.read_i32()?;
        let hash_seed = reader.read_flag()?;
        let oid_len = reader.read_u8()? as usize;
        let oid = reader.read_slice(oid_len)?.to_vec();
        let sparse = reader.read_flag()?;
        let fast_fp = reader.read_flag()?;
        let poly_type = NtruPolyType::from_i32(reader.read_i32()?)?;
        let name_len = reader.read_u8()? as usize;
        let name_bytes = reader.read_slice(name_len)?;
        let name = core::str::from_utf8(name_bytes).map_err(|_| Error::Encoding {
            context: "NTRU parameter decoding",
            details: "digest algorithm name is not valid UTF-8",
        })?;
        let digest = digest_factory(name).ok_or_else(|| Error::Config {
            context: "NTRU parameter decoding",
            message: format!("no digest registered for algorithm '{}'", name),
        })?;
        reader.finish()?;

        Ok(match poly_type {
            NtruPolyType::Simple => Self::new_simple(
                n,
                q,
                df,
                dm0,
                db,
                c,
                min_calls_r,
                min_calls_mask,
                hash_seed,
                oid,
                sparse,
                fast_fp,
                digest,
            ),
            NtruPolyType::Product => Self::new_product(
                n,
                q,
                df1,
                df2,
                df3,
                dm0,
                db,
                c,
                min_calls_r,
                min_calls_mask,
                hash_seed,
                oid,
                sparse,
                fast_fp,
                digest,
            ),
        })
    }

    // --- predefined parameter sets ------------------------------------

    /// EES1087EP2: conservative parameter set at the 256-bit level.
    pub fn ees1087ep2() -> Self {
        Self::new_simple(
            1087,
            2048,
            120,
            120,
            256,
            13,
            25,
            14,
            true,
            vec![0, 6, 3],
            true,
            false,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }

    /// EES1171EP1: parameter set balancing key size and speed at the
    /// 256-bit level.
    pub fn ees1171ep1() -> Self {
        Self::new_simple(
            1171,
            2048,
            106,
            106,
            256,
            13,
            20,
            15,
            true,
            vec![0, 6, 4],
            true,
            false,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }

    /// EES1499EP1: speed-optimized parameter set at the 256-bit level.
    pub fn ees1499ep1() -> Self {
        Self::new_simple(
            1499,
            2048,
            79,
            79,
            256,
            13,
            17,
            19,
            true,
            vec![0, 6, 5],
            true,
            false,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }

    /// EES1499EP1 variant that consumes the caller's seed directly instead
    /// of hashing it.
    pub fn ees1499ep1_ext() -> Self {
        Self::new_simple(
            1499,
            2048,
            79,
            79,
            256,
            13,
            17,
            19,
            false,
            vec![0, 6, 5],
            true,
            false,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }

    /// APR2011_439: 128-bit-level set from the 2011 parameter revision.
    pub fn apr2011_439() -> Self {
        Self::new_simple(
            439,
            2048,
            146,
            130,
            128,
            9,
            32,
            9,
            true,
            vec![0, 7, 101],
            true,
            false,
            Box::new(crate::digest::Sha256Digest::new()),
        )
    }

    /// APR2011_439 in product form, for fast polynomial multiplication.
    pub fn apr2011_439_fast() -> Self {
        Self::new_product(
            439,
            2048,
            9,
            8,
            5,
            130,
            128,
            9,
            32,
            9,
            true,
            vec![0, 7, 101],
            true,
            true,
            Box::new(crate::digest::Sha256Digest::new()),
        )
    }

    /// APR2011_743: 256-bit-level set from the 2011 parameter revision.
    pub fn apr2011_743() -> Self {
        Self::new_simple(
            743,
            2048,
            248,
            220,
            256,
            10,
            27,
            14,
            true,
            vec![0, 7, 105],
            false,
            false,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }

    /// APR2011_743 in product form, for fast polynomial multiplication.
    pub fn apr2011_743_fast() -> Self {
        Self::new_product(
            743,
            2048,
            11,
            11,
            15,
            220,
            256,
            10,
            27,
            14,
            true,
            vec![0, 7, 105],
            false,
            true,
            Box::new(crate::digest::Sha512Digest::new()),
        )
    }
}

impl PartialEq for NtruEncryptParams {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self.q == other.q
            && self.df == other.df
            && self.df1 == other.df1
            && self.df2 == other.df2
            && self.df3 == other.df3
            && self.dm0 == other.dm0
            && self.db == other.db
            && self.c == other.c
            && self.min_calls_r == other.min_calls_r
            && self.min_calls_mask == other.min_calls_mask
            && self.hash_seed == other.hash_seed
            && self.oid == other.oid
            && self.sparse == other.sparse
            && self.fast_fp == other.fast_fp
            && self.poly_type == other.poly_type
            && self.dr == other.dr
            && self.dr1 == other.dr1
            && self.dr2 == other.dr2
            && self.dr3 == other.dr3
            && self.dg == other.dg
            && self.llen == other.llen
            && self.max_msg_len_bytes == other.max_msg_len_bytes
            && self.buffer_len_bits == other.buffer_len_bits
            && self.buffer_len_trits == other.buffer_len_trits
            && self.pk_len == other.pk_len
            && self.digest.algorithm_name() == other.digest.algorithm_name()
    }
}

impl Eq for NtruEncryptParams {}

impl Hash for NtruEncryptParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.hash(state);
        self.q.hash(state);
        self.df.hash(state);
        self.df1.hash(state);
        self.df2.hash(state);
        self.df3.hash(state);
        self.dm0.hash(state);
        self.db.hash(state);
        self.c.hash(state);
        self.min_calls_r.hash(state);
        self.min_calls_mask.hash(state);
        self.hash_seed.hash(state);
        self.oid.hash(state);
        self.sparse.hash(state);
        self.fast_fp.hash(state);
        self.poly_type.hash(state);
        self.dr.hash(state);
        self.dr1.hash(state);
        self.dr2.hash(state);
        self.dr3.hash(state);
        self.dg.hash(state);
        self.llen.hash(state);
        self.max_msg_len_bytes.hash(state);
        self.buffer_len_bits.hash(state);
        self.buffer_len_trits.hash(state);
        self.pk_len.hash(state);
        self.digest.algorithm_name().hash(state);
    }
}

impl core::fmt::Debug for NtruEncryptParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NtruEncryptParams")
            .field("n", &self.n)
            .field("q", &self.q)
            .field("poly_type", &self.poly_type)
            .field("oid", &self.oid)
            .field("digest", &self.digest.algorithm_name())
            .finish()
    }
}

/// Bounds-checked sequential reader for the canonical encoding.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() - self.pos < len {
            return Err(Error::Encoding {
                context: "NTRU parameter decoding",
                details: "buffer is truncated",
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let slice = self.read_slice(4)?;
        Ok(i32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    fn read_flag(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::Encoding {
                context: "NTRU parameter decoding",
                details: "boolean flag is neither 0 nor 1",
            }),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(Error::Encoding {
                context: "NTRU parameter decoding",
                details: "trailing bytes after the parameter block",
            });
        }
        Ok(())
    }
}
