//! Error-correcting code constructions

pub mod goppa;
