//! Error handling for the mathematical core

use core::fmt;
use std::borrow::Cow;

use pqcore_api::Error as ApiError;

/// The error type for the mathematical core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unusable structural configuration (field degree out of range,
    /// reducible defining polynomial)
    Config {
        /// What was being configured
        context: &'static str,
        /// Why the configuration was rejected
        message: String,
    },

    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Algebraic failure: division by the zero polynomial, inverse of the
    /// zero element, singular matrix inversion
    Arithmetic {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Byte-level encoding violation: incompatible buffer length, decoded
    /// value outside the field, zero head coefficient
    Encoding {
        /// What was being encoded or decoded
        context: &'static str,
        /// Additional details about the violation
        details: &'static str,
    },

    /// Input outside the code (syndrome not decodable)
    Decoding {
        /// What was being decoded
        context: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for operations of the mathematical core
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config { context, message } => {
                write!(f, "Invalid configuration for {}: {}", context, message)
            }
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Arithmetic { operation, details } => {
                write!(f, "Arithmetic error in {}: {}", operation, details)
            }
            Error::Encoding { context, details } => {
                write!(f, "Encoding error for {}: {}", context, details)
            }
            Error::Decoding { context } => write!(f, "Decoding failed: {}", context),
        }
    }
}

impl std::error::Error for Error {}

// Conversion into the api-level error
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Config { context, message } => ApiError::Config { context, message },
            Error::Parameter { name, reason } => ApiError::InvalidInput {
                context: "parameter validation",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => ApiError::Length {
                context,
                expected,
                actual,
            },
            Error::Arithmetic { operation, details } => {
                ApiError::Arithmetic { operation, details }
            }
            Error::Encoding { context, details } => ApiError::Encoding { context, details },
            Error::Decoding { context } => ApiError::Decoding { context },
        }
    }
}

// Include the validation submodule
pub mod validate;
