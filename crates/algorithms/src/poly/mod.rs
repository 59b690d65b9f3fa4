//! Polynomial arithmetic over GF(2^m)

mod gf2m;
mod ring;

pub use gf2m::Gf2mPoly;
pub use ring::SquareRootRing;
