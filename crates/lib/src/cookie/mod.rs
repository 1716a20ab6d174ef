//! oauth2_proxy cookie validation.
//!
//! A [`Validator`] holds the secret shared with the proxy and checks cookie
//! values of the form `base64url(identity)|unix_seconds|base64url(mac)`.
//!
//! Validation is a single pass, each step failing early with its own error:
//!
//! 1. split the value into exactly three segments ([`ValidateError::InvalidCookie`])
//! 2. recompute `HMAC(secret, cookie_name, segment0, segment1)` and compare it
//!    in constant time with the decoded third segment ([`ValidateError::InvalidSignature`])
//! 3. parse the timestamp ([`ValidateError::InvalidCookie`])
//! 4. check it lies within `[now - expiration, now + 5 minutes]`
//!    ([`ValidateError::ExpiredCookie`])
//! 5. decode the identity ([`ValidateError::InvalidCookie`])
//!
//! The validator never logs and never mutates itself, so one instance can be
//! shared across threads for the lifetime of the process.

pub mod errors;
pub mod mac;
mod wire;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use zeroize::Zeroizing;

pub use errors::ValidateError;
pub use mac::{MacAlgorithm, UnknownAlgorithm};
use wire::CookieSegments;

use crate::clock::{Clock, SystemClock};
use crate::constants::{CLOCK_SKEW_SECS, DEFAULT_EXPIRATION_SECS};

/// Validates signed cookies issued by oauth2_proxy.
pub struct Validator {
    secret: Zeroizing<Vec<u8>>,
    cookie_name: String,
    expiration: TimeDelta,
    algorithm: MacAlgorithm,
    clock: Arc<dyn Clock>,
}

impl Validator {
    /// Create a validator with the default expiration (7 days), HMAC-SHA256
    /// and the system clock.
    ///
    /// # Errors
    /// Returns [`ValidateError::Config`] if `secret` or `cookie_name` is empty.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        cookie_name: impl Into<String>,
    ) -> Result<Self, ValidateError> {
        Self::builder(secret, cookie_name).build()
    }

    /// Start building a validator with non-default settings.
    pub fn builder(
        secret: impl Into<Vec<u8>>,
        cookie_name: impl Into<String>,
    ) -> ValidatorBuilder {
        ValidatorBuilder {
            secret: Zeroizing::new(secret.into()),
            cookie_name: cookie_name.into(),
            expiration: TimeDelta::seconds(DEFAULT_EXPIRATION_SECS),
            algorithm: MacAlgorithm::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Validate a raw cookie value.
    ///
    /// `raw_cookie` is the cookie value exactly as received; no shape is
    /// assumed. On success returns the decoded identity payload and the
    /// issuance time.
    ///
    /// # Example
    ///
    /// ```
    /// use oauth2_proxy_cookie::Validator;
    ///
    /// let validator = Validator::new("ThisIsASecret", "_oauth2_proxy").unwrap();
    /// let err = validator.validate("foobar").unwrap_err();
    /// assert!(err.is_invalid_cookie());
    /// ```
    pub fn validate(&self, raw_cookie: &str) -> Result<(Vec<u8>, DateTime<Utc>), ValidateError> {
        let segments = CookieSegments::split(raw_cookie)?;

        let [value, timestamp] = segments.signed_fields();
        // An undecodable signature still goes through the MAC and fails there
        let provided = segments.decode_signature().unwrap_or_default();
        if !self.algorithm.verify(
            &self.secret,
            &[self.cookie_name.as_bytes(), value, timestamp],
            &provided,
        ) {
            return Err(ValidateError::InvalidSignature);
        }

        let issued_at = segments.issued_at()?;
        self.check_window(issued_at)?;

        let identity = segments.decode_value()?;
        Ok((identity, issued_at))
    }

    /// Reject timestamps older than `expiration` or more than the clock skew
    /// ahead of now. Both bounds are inclusive.
    fn check_window(&self, issued_at: DateTime<Utc>) -> Result<(), ValidateError> {
        let now = self.clock.now();
        let too_old = now
            .checked_sub_signed(self.expiration)
            .is_some_and(|oldest| issued_at < oldest);
        let too_new = now
            .checked_add_signed(TimeDelta::seconds(CLOCK_SKEW_SECS))
            .is_some_and(|newest| issued_at > newest);

        if too_old || too_new {
            return Err(ValidateError::ExpiredCookie { issued_at });
        }
        Ok(())
    }

    /// Name of the cookie this validator is bound to.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// How long after issuance a cookie stays valid.
    pub fn expiration(&self) -> TimeDelta {
        self.expiration
    }

    /// MAC algorithm used to check signatures.
    pub fn algorithm(&self) -> MacAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("secret", &"[REDACTED]")
            .field("cookie_name", &self.cookie_name)
            .field("expiration", &self.expiration)
            .field("algorithm", &self.algorithm)
            .field("clock", &self.clock)
            .finish()
    }
}

/// Builder for [`Validator`].
///
/// Obtained from [`Validator::builder`]; settings are checked in
/// [`ValidatorBuilder::build`].
pub struct ValidatorBuilder {
    secret: Zeroizing<Vec<u8>>,
    cookie_name: String,
    expiration: TimeDelta,
    algorithm: MacAlgorithm,
    clock: Arc<dyn Clock>,
}

impl ValidatorBuilder {
    /// How far in the past an issuance time may be. Must not be negative.
    pub fn expiration(mut self, expiration: TimeDelta) -> Self {
        self.expiration = expiration;
        self
    }

    /// Hash used for the cookie HMAC.
    pub fn algorithm(mut self, algorithm: MacAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Time source for the validity window, typically
    /// [`FixedClock`](crate::FixedClock) in tests.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check the settings and build the validator.
    ///
    /// # Errors
    /// Returns [`ValidateError::Config`] if the secret or cookie name is empty
    /// or the expiration is negative.
    pub fn build(self) -> Result<Validator, ValidateError> {
        if self.secret.is_empty() {
            return Err(ValidateError::Config {
                reason: "secret must not be empty",
            });
        }
        if self.cookie_name.is_empty() {
            return Err(ValidateError::Config {
                reason: "cookie name must not be empty",
            });
        }
        if self.expiration < TimeDelta::zero() {
            return Err(ValidateError::Config {
                reason: "expiration must not be negative",
            });
        }

        Ok(Validator {
            secret: self.secret,
            cookie_name: self.cookie_name,
            expiration: self.expiration,
            algorithm: self.algorithm,
            clock: self.clock,
        })
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("secret", &"[REDACTED]")
            .field("cookie_name", &self.cookie_name)
            .field("expiration", &self.expiration)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
