//! Integration tests for the NTRU parameter blocks

use pqcore::prelude::*;

#[test]
fn predefined_sets_roundtrip_through_the_facade() {
    let sets = [
        NtruEncryptParams::ees1087ep2(),
        NtruEncryptParams::ees1171ep1(),
        NtruEncryptParams::ees1499ep1(),
        NtruEncryptParams::ees1499ep1_ext(),
        NtruEncryptParams::apr2011_439(),
        NtruEncryptParams::apr2011_439_fast(),
        NtruEncryptParams::apr2011_743(),
        NtruEncryptParams::apr2011_743_fast(),
    ];
    for params in sets {
        let bytes = params.to_bytes();
        let back = NtruEncryptParams::from_bytes(&bytes, digest_from_name).unwrap();
        assert_eq!(back, params);
    }
}

#[test]
fn digest_collaborator_flows_through_the_block() {
    let params = NtruEncryptParams::apr2011_439();
    assert_eq!(params.digest_name(), "SHA-256");
    assert_eq!(params.digest().output_size(), 32);

    let mut digest = digest_from_name(params.digest_name()).unwrap();
    digest.update(b"seed material");
    let first = digest.finalize_reset();
    digest.update(b"seed material");
    assert_eq!(digest.finalize_reset(), first);
}

#[test]
fn simple_and_product_shapes_disagree() {
    let simple = NtruEncryptParams::apr2011_439();
    let product = NtruEncryptParams::apr2011_439_fast();
    assert_eq!(simple.n, product.n);
    assert_eq!(simple.oid, product.oid);
    assert_ne!(simple, product);
    assert_eq!(simple.poly_type, NtruPolyType::Simple);
    assert_eq!(product.poly_type, NtruPolyType::Product);
}
