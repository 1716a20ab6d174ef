//! Validator settings loaded from the environment.
//!
//! oauth2_proxy deployments usually hand the shared secret to downstream
//! services through the environment. [`ValidatorSettings`] reads:
//!
//! | Key                              | Default          |
//! |----------------------------------|------------------|
//! | `OAUTH2_PROXY_COOKIE_SECRET`     | required         |
//! | `OAUTH2_PROXY_COOKIE_NAME`       | `_oauth2_proxy`  |
//! | `OAUTH2_PROXY_COOKIE_EXPIRATION` | `7d`             |
//! | `OAUTH2_PROXY_COOKIE_ALGORITHM`  | `sha256`         |
//!
//! Empty values count as unset.

pub mod errors;

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use zeroize::Zeroizing;

pub use errors::SettingsError;

use crate::Result;
use crate::clock::Clock;
use crate::constants::{
    DEFAULT_COOKIE_NAME, DEFAULT_EXPIRATION_SECS, ENV_ALGORITHM, ENV_COOKIE_NAME, ENV_EXPIRATION,
    ENV_SECRET,
};
use crate::cookie::{MacAlgorithm, Validator, ValidatorBuilder};

/// Everything needed to build a [`Validator`].
pub struct ValidatorSettings {
    /// Secret shared with the proxy, used verbatim as the HMAC key.
    pub secret: Zeroizing<Vec<u8>>,
    /// Name of the cookie the proxy sets.
    pub cookie_name: String,
    /// How long after issuance a cookie stays valid.
    pub expiration: TimeDelta,
    /// Hash used for the cookie HMAC.
    pub algorithm: MacAlgorithm,
}

impl ValidatorSettings {
    /// Settings with the given secret and defaults for everything else.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            expiration: TimeDelta::seconds(DEFAULT_EXPIRATION_SECS),
            algorithm: MacAlgorithm::default(),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> std::result::Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use oauth2_proxy_cookie::ValidatorSettings;
    ///
    /// let env = HashMap::from([("OAUTH2_PROXY_COOKIE_SECRET", "s3cret")]);
    /// let settings = ValidatorSettings::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
    /// assert_eq!(settings.cookie_name, "_oauth2_proxy");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let secret = get(ENV_SECRET).ok_or(SettingsError::MissingSecret { key: ENV_SECRET })?;
        let mut settings = Self::new(secret.into_bytes());

        if let Some(cookie_name) = get(ENV_COOKIE_NAME) {
            settings.cookie_name = cookie_name;
        }
        if let Some(expiration) = get(ENV_EXPIRATION) {
            settings.expiration = parse_expiration(&expiration)?;
        }
        if let Some(algorithm) = get(ENV_ALGORITHM) {
            settings.algorithm = parse_algorithm(&algorithm)?;
        }

        Ok(settings)
    }

    /// Build a validator using the system clock.
    pub fn into_validator(self) -> Result<Validator> {
        Ok(self.into_builder().build()?)
    }

    /// Build a validator reading time from `clock`.
    pub fn into_validator_with_clock(self, clock: Arc<dyn Clock>) -> Result<Validator> {
        Ok(self.into_builder().clock(clock).build()?)
    }

    fn into_builder(mut self) -> ValidatorBuilder {
        // Move the key out instead of copying it
        let secret = std::mem::take(&mut *self.secret);
        Validator::builder(secret, self.cookie_name)
            .expiration(self.expiration)
            .algorithm(self.algorithm)
    }
}

impl fmt::Debug for ValidatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSettings")
            .field("secret", &"[REDACTED]")
            .field("cookie_name", &self.cookie_name)
            .field("expiration", &self.expiration)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Parse an expiration such as `3600`, `90s`, `30m`, `12h` or `7d`.
///
/// A bare number is seconds. Negative values are rejected.
pub fn parse_expiration(value: &str) -> std::result::Result<TimeDelta, SettingsError> {
    let invalid = |reason| SettingsError::InvalidExpiration {
        value: value.to_string(),
        reason,
    };

    let trimmed = value.trim();
    let (digits, unit_secs) = match trimmed.char_indices().last() {
        Some((idx, 's')) => (&trimmed[..idx], 1),
        Some((idx, 'm')) => (&trimmed[..idx], 60),
        Some((idx, 'h')) => (&trimmed[..idx], 60 * 60),
        Some((idx, 'd')) => (&trimmed[..idx], 24 * 60 * 60),
        Some(_) => (trimmed, 1),
        None => return Err(invalid("empty value")),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a non-negative whole number with optional s/m/h/d unit"));
    }
    let amount: i64 = digits.parse().map_err(|_| invalid("number is too large"))?;

    amount
        .checked_mul(unit_secs)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| invalid("duration is too large"))
}

fn parse_algorithm(value: &str) -> std::result::Result<MacAlgorithm, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidAlgorithm {
        value: value.to_string(),
    })
}
