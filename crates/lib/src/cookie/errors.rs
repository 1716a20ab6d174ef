//! Validation error types.
//!
//! A single flat enum covers every way a cookie can be rejected, plus the
//! construction-time configuration failure.

use chrono::{DateTime, Utc};
use thiserror::Error as ThisError;

use crate::Error;

/// Errors returned by [`Validator`](super::Validator).
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - [`ValidateError::kind`] names are stable and safe to log
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidateError {
    /// The validator was constructed with an unusable configuration.
    #[error("Invalid validator configuration: {reason}")]
    Config {
        /// Description of the misconfiguration
        reason: &'static str,
    },

    /// The cookie value is structurally malformed.
    #[error("Invalid cookie: {reason}")]
    InvalidCookie {
        /// Which part of the cookie could not be parsed
        reason: &'static str,
    },

    /// The signature does not match the cookie contents.
    #[error("Invalid cookie signature")]
    InvalidSignature,

    /// The cookie is correctly signed but outside the validity window.
    #[error("Cookie issued at {issued_at} is outside the validity window")]
    ExpiredCookie {
        /// When the cookie claims it was issued
        issued_at: DateTime<Utc>,
    },
}

impl ValidateError {
    /// Stable name of the failure kind, for audit logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidateError::Config { .. } => "ConfigError",
            ValidateError::InvalidCookie { .. } => "InvalidCookie",
            ValidateError::InvalidSignature => "InvalidSignature",
            ValidateError::ExpiredCookie { .. } => "ExpiredCookie",
        }
    }

    /// Check if this error is a construction-time misconfiguration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, ValidateError::Config { .. })
    }

    /// Check if this error indicates a structurally malformed cookie.
    pub fn is_invalid_cookie(&self) -> bool {
        matches!(self, ValidateError::InvalidCookie { .. })
    }

    /// Check if this error indicates a signature mismatch.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, ValidateError::InvalidSignature)
    }

    /// Check if this error indicates a stale or future-dated cookie.
    pub fn is_expired(&self) -> bool {
        matches!(self, ValidateError::ExpiredCookie { .. })
    }

    /// Check if this error was caused by the presented cookie rather than
    /// by the validator's configuration.
    pub fn is_rejection(&self) -> bool {
        !self.is_config_error()
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Error::Validate(err)
    }
}
