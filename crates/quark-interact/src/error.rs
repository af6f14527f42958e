//! Error types for force-law construction.

use std::error::Error;
use std::fmt;

/// Errors raised when a force law is built with unusable parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionError {
    /// A numeric parameter is NaN, infinite or outside its valid range.
    InvalidParameter {
        /// Which force law rejected the value.
        law: &'static str,
        /// Name of the parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                law,
                parameter,
                value,
            } => write!(f, "{law}: invalid {parameter} {value}"),
        }
    }
}

impl Error for InteractionError {}

/// Reject `value` unless it is finite and strictly positive.
pub(crate) fn require_positive(
    law: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64, InteractionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InteractionError::InvalidParameter {
            law,
            parameter,
            value,
        })
    }
}
