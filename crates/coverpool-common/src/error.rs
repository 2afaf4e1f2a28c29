//! Error types for Coverpool
//!
//! Provides a unified error type and the payout-domain error variants

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using CoverpoolError
pub type Result<T> = std::result::Result<T, CoverpoolError>;

/// Unified error type for Coverpool operations
#[derive(Debug, Error)]
pub enum CoverpoolError {
    // Payout errors
    #[error("Payout error: {0}")]
    Payout(#[from] PayoutError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`PayoutError`]
///
/// `DivisionByZero` usually means the pool is not funded yet; callers
/// should show a neutral placeholder rather than treat it as a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Structural precondition violated, not retryable without new input
    InvalidArgument,
    /// A divisor (pool total or payout ratio) is zero
    DivisionByZero,
    /// Intermediate value left the decimal range
    Overflow,
}

/// Payout calculation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayoutError {
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Division by zero: `{divisor}` is zero")]
    DivisionByZero { divisor: &'static str },

    #[error("Payout calculation overflow")]
    Overflow,
}

impl PayoutError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PayoutError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PayoutError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            PayoutError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            PayoutError::Overflow => ErrorKind::Overflow,
        }
    }
}

impl CoverpoolError {
    /// Kind of the underlying payout error, if this is one
    pub fn payout_kind(&self) -> Option<ErrorKind> {
        match self {
            CoverpoolError::Payout(err) => Some(err.kind()),
            _ => None,
        }
    }
}
