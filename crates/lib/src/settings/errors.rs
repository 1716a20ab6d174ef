//! Settings error types.

use thiserror::Error as ThisError;

use crate::Error;

/// Errors that can occur while reading validator settings.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SettingsError {
    /// No cookie secret was configured.
    #[error("Missing cookie secret ({key} is not set)")]
    MissingSecret {
        /// Configuration key that was looked up
        key: &'static str,
    },

    /// The expiration could not be parsed.
    #[error("Invalid expiration '{value}': {reason}")]
    InvalidExpiration {
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The MAC algorithm name is unknown.
    #[error("Invalid MAC algorithm '{value}', expected 'sha256' or 'sha1'")]
    InvalidAlgorithm {
        /// The rejected value
        value: String,
    },
}

impl SettingsError {
    /// Check if this error indicates a required setting is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, SettingsError::MissingSecret { .. })
    }

    /// Check if this error indicates a setting has an unparseable value.
    pub fn is_invalid_value(&self) -> bool {
        matches!(
            self,
            SettingsError::InvalidExpiration { .. } | SettingsError::InvalidAlgorithm { .. }
        )
    }
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Error::Settings(err)
    }
}
