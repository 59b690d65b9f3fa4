//! Integer, big-integer and byte utilities shared by the math layers

pub mod bigint;
pub mod bytes;
pub mod ct;
