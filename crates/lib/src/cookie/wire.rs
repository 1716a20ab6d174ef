//! Cookie value wire format.
//!
//! `base64url(identity)|unix_seconds|base64url(signature)`, padded URL-safe
//! base64 on both encoded segments.

use base64ct::{Base64Url, Encoding};
use chrono::{DateTime, Utc};

use super::errors::ValidateError;
use crate::constants::SEGMENT_SEPARATOR;

/// The three raw segments of a cookie value, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CookieSegments<'a> {
    /// Encoded identity, exactly as received.
    pub value: &'a str,
    /// Decimal timestamp, exactly as received.
    pub timestamp: &'a str,
    /// Encoded signature.
    pub signature: &'a str,
}

impl<'a> CookieSegments<'a> {
    /// Split a raw cookie value into its three segments.
    pub fn split(raw: &'a str) -> Result<Self, ValidateError> {
        let mut parts = raw.split(SEGMENT_SEPARATOR);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(value), Some(timestamp), Some(signature), None) => Ok(Self {
                value,
                timestamp,
                signature,
            }),
            _ => Err(ValidateError::InvalidCookie {
                reason: "expected 3 '|'-separated segments",
            }),
        }
    }

    /// The signed fields following `cookie_name`, in signing order.
    pub fn signed_fields(&self) -> [&'a [u8]; 2] {
        [self.value.as_bytes(), self.timestamp.as_bytes()]
    }

    /// Decode the provided signature.
    ///
    /// Undecodable input is reported as a signature mismatch so it cannot be
    /// told apart from a wrong signature.
    pub fn decode_signature(&self) -> Result<Vec<u8>, ValidateError> {
        Base64Url::decode_vec(self.signature).map_err(|_| ValidateError::InvalidSignature)
    }

    /// Parse the issuance timestamp.
    pub fn issued_at(&self) -> Result<DateTime<Utc>, ValidateError> {
        let secs: i64 = self
            .timestamp
            .parse()
            .map_err(|_| ValidateError::InvalidCookie {
                reason: "timestamp is not a decimal integer",
            })?;
        DateTime::from_timestamp(secs, 0).ok_or(ValidateError::InvalidCookie {
            reason: "timestamp is out of range",
        })
    }

    /// Decode the identity payload.
    pub fn decode_value(&self) -> Result<Vec<u8>, ValidateError> {
        Base64Url::decode_vec(self.value).map_err(|_| ValidateError::InvalidCookie {
            reason: "identity is not valid base64url",
        })
    }
}
