//! Byte-array primitives: XOR, hex, split, concatenation, digesting

use pqcore_api::Digest;

use crate::error::{validate, Error, Result};

/// XOR of two equal-length byte slices.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    validate::length("byte xor", b.len(), a.len())?;
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// Concatenation of an arbitrary number of byte slices.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Splits `bytes` at `index`, rejecting out-of-range split points.
pub fn split(bytes: &[u8], index: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    if index > bytes.len() {
        return Err(Error::Length {
            context: "byte split",
            expected: index,
            actual: bytes.len(),
        });
    }
    let (head, tail) = bytes.split_at(index);
    Ok((head.to_vec(), tail.to_vec()))
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Hex decoding; rejects odd lengths and non-hex characters.
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|_| Error::Encoding {
        context: "hex string",
        details: "not a valid hex encoding",
    })
}

/// Digests the concatenation of `parts` with the supplied collaborator.
///
/// The digest is reset first, so a partially absorbed state cannot leak
/// into the result.
pub fn digest_all(digest: &mut dyn Digest, parts: &[&[u8]]) -> Vec<u8> {
    digest.reset();
    for part in parts {
        digest.update(part);
    }
    digest.finalize_reset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_roundtrip() {
        let a = [0x0fu8, 0xf0, 0xaa];
        let b = [0xffu8, 0x0f, 0x55];
        let x = xor(&a, &b).unwrap();
        assert_eq!(x, vec![0xf0, 0xff, 0xff]);
        assert_eq!(xor(&x, &b).unwrap(), a.to_vec());
    }

    #[test]
    fn xor_rejects_length_mismatch() {
        assert!(xor(&[1, 2], &[1, 2, 3]).is_err());
    }

    #[test]
    fn concat_and_split() {
        let joined = concat(&[b"ab", b"", b"cde"]);
        assert_eq!(joined, b"abcde");
        let (head, tail) = split(&joined, 2).unwrap();
        assert_eq!(head, b"ab");
        assert_eq!(tail, b"cde");
        assert!(split(&joined, 6).is_err());
    }

    #[test]
    fn hex_roundtrip() {
        let bytes = [0x00u8, 0x07, 0x65];
        let s = to_hex(&bytes);
        assert_eq!(s, "000765");
        assert_eq!(from_hex(&s).unwrap(), bytes.to_vec());
        assert!(from_hex("0x!").is_err());
    }
}
