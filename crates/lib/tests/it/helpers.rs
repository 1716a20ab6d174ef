//! Shared fixtures for the integration tests.
//!
//! The cookies below were produced by an oauth2_proxy configured with
//! `ThisIsASecret` and the default cookie name.

use std::sync::Arc;

use base64ct::{Base64Url, Encoding};
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use oauth2_proxy_cookie::{FixedClock, MacAlgorithm, Validator};
use sha1::Sha1;
use sha2::Sha256;

pub const SECRET: &[u8] = b"ThisIsASecret";
pub const COOKIE_NAME: &str = "_oauth2_proxy";

/// 2017-01-01T06:00:00Z
pub const COOKIE_DATE: i64 = 1483250400;

pub const VALID_COOKIE: &str =
    "Zm9vQGJhcg==|1483250400|WW3isJGM26B1RCA2fxVnI0c88nzEdPmt5Yjs8I7Y6DE=";
pub const INVALID_COOKIE: &str = "AAAA|1483250400|WW3isJGM26B1RCA2fxVnI0c88nzEdPmt5Yjs8I7Y6DE=";
pub const EXPIRED_COOKIE: &str =
    "Zm9vQGJhcg==|1483254000|1d7LggzEsqWNe3KWNb7Tv3VIZhcc3WMKJ6YgPQ13Das=";
pub const SHA1_COOKIE: &str = "Zm9vQGJhcg==|1483250400|7_TbBXD14iv4kEh5wPWzTdTe0Oo=";

pub fn cookie_date() -> DateTime<Utc> {
    DateTime::from_timestamp(COOKIE_DATE, 0).unwrap()
}

/// Validator with a one hour expiration and a clock frozen at [`COOKIE_DATE`].
pub fn frozen_validator() -> (Validator, Arc<FixedClock>) {
    frozen_validator_with(MacAlgorithm::Sha256, TimeDelta::hours(1))
}

pub fn frozen_validator_with(
    algorithm: MacAlgorithm,
    expiration: TimeDelta,
) -> (Validator, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::from_secs(COOKIE_DATE));
    let validator = Validator::builder(SECRET, COOKIE_NAME)
        .expiration(expiration)
        .algorithm(algorithm)
        .clock(clock.clone())
        .build()
        .expect("Failed to build validator");
    (validator, clock)
}

/// Build a cookie the way oauth2_proxy does.
pub fn sign_cookie(secret: &[u8], cookie_name: &str, identity: &[u8], timestamp: i64) -> String {
    let value = Base64Url::encode_string(identity);
    let timestamp = timestamp.to_string();
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(cookie_name.as_bytes());
    mac.update(value.as_bytes());
    mac.update(timestamp.as_bytes());
    let signature = Base64Url::encode_string(&mac.finalize().into_bytes());
    format!("{value}|{timestamp}|{signature}")
}

/// Same as [`sign_cookie`] with the legacy SHA-1 MAC.
pub fn sign_cookie_sha1(
    secret: &[u8],
    cookie_name: &str,
    identity: &[u8],
    timestamp: i64,
) -> String {
    let value = Base64Url::encode_string(identity);
    let timestamp = timestamp.to_string();
    let mut mac = Hmac::<Sha1>::new_from_slice(secret).unwrap();
    mac.update(cookie_name.as_bytes());
    mac.update(value.as_bytes());
    mac.update(timestamp.as_bytes());
    let signature = Base64Url::encode_string(&mac.finalize().into_bytes());
    format!("{value}|{timestamp}|{signature}")
}
