//! Integration tests for the Goppa-code pipeline

use pqcore::prelude::*;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;

/// Key-generation-shaped flow: field, random Goppa polynomial, canonical
/// check matrix, systematic form, then decode an injected error pattern.
#[test]
fn end_to_end_decode_cycle() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    let field = Arc::new(Gf2mField::new(6).unwrap());
    let t = 5usize;
    let n = 1usize << 6;

    let g = Gf2mPoly::random_irreducible(field.clone(), t, &mut rng).unwrap();
    let h = goppa::parity_check_matrix(&field, &g).unwrap();
    assert_eq!(h.rows(), t * 6);
    assert_eq!(h.cols(), n);

    let ring = SquareRootRing::new(field.clone(), &g).unwrap();

    for weight in [1usize, 3, t] {
        let e = BitVector::random_weight(n, weight, &mut rng).unwrap();
        let syndrome = h.mul_vector(&e).unwrap();
        let decoded = goppa::syndrome_decode(&syndrome, &field, &g, &ring).unwrap();
        assert_eq!(decoded, e);
    }
}

#[test]
fn systematic_form_matches_its_factors() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    let field = Arc::new(Gf2mField::new(5).unwrap());
    let g = Gf2mPoly::random_irreducible(field.clone(), 4, &mut rng).unwrap();
    let h = goppa::parity_check_matrix(&field, &g).unwrap();

    let sf = goppa::systematic_form(&h, &mut rng).unwrap();
    let s = sf.s_inv.compute_inverse().unwrap();
    let reassembled = s
        .multiply(&h.right_multiply(&sf.p).unwrap())
        .unwrap();
    assert_eq!(reassembled, sf.m.extend_left_identity().unwrap());

    let generator = goppa::generator_set(&sf).unwrap();
    assert_eq!(generator.matrix.rows(), h.cols() - h.rows());
    assert_eq!(generator.matrix.cols(), h.cols());
}

/// The decoder is deterministic, so an OS-seeded run must agree with
/// itself after re-deriving the syndrome.
#[test]
fn decode_with_os_randomness() {
    let mut rng = OsRng;

    let field = Arc::new(Gf2mField::new(5).unwrap());
    let g = Gf2mPoly::random_irreducible(field.clone(), 3, &mut rng).unwrap();
    let h = goppa::parity_check_matrix(&field, &g).unwrap();
    let ring = SquareRootRing::new(field.clone(), &g).unwrap();

    let e = BitVector::random_weight(32, 3, &mut rng).unwrap();
    let syndrome = h.mul_vector(&e).unwrap();
    let decoded = goppa::syndrome_decode(&syndrome, &field, &g, &ring).unwrap();
    assert_eq!(h.mul_vector(&decoded).unwrap(), syndrome);
    assert_eq!(decoded, e);
}

#[test]
fn check_matrix_serialization_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);

    let field = Arc::new(Gf2mField::new(4).unwrap());
    let g = Gf2mPoly::random_irreducible(field.clone(), 2, &mut rng).unwrap();
    let h = goppa::parity_check_matrix(&field, &g).unwrap();

    let bytes = h.encode();
    let back = BitMatrix::decode(h.cols(), &bytes).unwrap();
    assert_eq!(back, h);
}

#[test]
fn goppa_polynomial_serialization_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(13);

    let field = Arc::new(Gf2mField::new(11).unwrap());
    let g = Gf2mPoly::random_irreducible(field.clone(), 8, &mut rng).unwrap();

    let bytes = g.encode();
    // GF(2^11) packs each coefficient into two bytes
    assert_eq!(bytes.len(), 2 * 9);
    let back = Gf2mPoly::decode(field, &bytes).unwrap();
    assert_eq!(back, g);
}
