//! Error type definitions for the pqcore operations

use std::fmt;

/// Primary error type for pqcore operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Out-of-range or otherwise unusable configuration parameter
    /// (field extension degree outside [2, 31], unknown polynomial type, ...)
    Config {
        /// What was being configured
        context: &'static str,
        /// Why the configuration was rejected
        message: String,
    },

    /// Malformed caller input (bad permutation array, mismatched sizes, ...)
    InvalidInput {
        /// Operation that rejected the input
        context: &'static str,
        /// Why the input was rejected
        message: String,
    },

    /// Algebraic failure (division by zero, inverse of zero, singular matrix)
    Arithmetic {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Byte-level encoding or decoding violation
    Encoding {
        /// What was being encoded or decoded
        context: &'static str,
        /// Why the bytes were rejected
        details: &'static str,
    },

    /// Input not decodable (syndrome outside the code)
    Decoding {
        /// What was being decoded
        context: &'static str,
    },

    /// Invalid length with expected/actual counts
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Randomness source failure
    RandomGeneration {
        /// Context where randomness was required
        context: &'static str,
    },
}

/// Result type for pqcore operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its payload
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Config { message, .. } => Self::Config { context, message },
            Self::InvalidInput { message, .. } => Self::InvalidInput { context, message },
            Self::Arithmetic { details, .. } => Self::Arithmetic {
                operation: context,
                details,
            },
            Self::Encoding { details, .. } => Self::Encoding { context, details },
            Self::Decoding { .. } => Self::Decoding { context },
            Self::Length {
                expected, actual, ..
            } => Self::Length {
                context,
                expected,
                actual,
            },
            Self::RandomGeneration { .. } => Self::RandomGeneration { context },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { context, message } => {
                write!(f, "Invalid configuration for {}: {}", context, message)
            }
            Self::InvalidInput { context, message } => {
                write!(f, "Invalid input to {}: {}", context, message)
            }
            Self::Arithmetic { operation, details } => {
                write!(f, "Arithmetic error in {}: {}", operation, details)
            }
            Self::Encoding { context, details } => {
                write!(f, "Encoding error for {}: {}", context, details)
            }
            Self::Decoding { context } => {
                write!(f, "Decoding failed: {}", context)
            }
            Self::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::RandomGeneration { context } => {
                write!(f, "Random generation failed in {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}
