//! Keyed MAC over the signed cookie fields.
//!
//! oauth2_proxy signs `cookie_name`, the encoded identity and the timestamp
//! as three successive updates of one HMAC. The hash is explicit
//! configuration: SHA-256 for current issuers, SHA-1 for legacy ones.

use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

/// Hash function underlying the cookie HMAC.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MacAlgorithm {
    /// HMAC-SHA256, 32 byte signatures.
    #[default]
    Sha256,
    /// HMAC-SHA1, 20 byte signatures. Only for older issuers.
    Sha1,
}

impl MacAlgorithm {
    /// Configuration name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            MacAlgorithm::Sha256 => "sha256",
            MacAlgorithm::Sha1 => "sha1",
        }
    }

    /// Size of a raw signature in bytes.
    pub fn output_size(&self) -> usize {
        match self {
            MacAlgorithm::Sha256 => 32,
            MacAlgorithm::Sha1 => 20,
        }
    }

    /// Recompute the MAC of `fields` under `key` and compare it with
    /// `signature` in constant time.
    ///
    /// A fresh MAC state is built on every call. A length mismatch is a plain
    /// `false`.
    pub(crate) fn verify(&self, key: &[u8], fields: &[&[u8]], signature: &[u8]) -> bool {
        match self {
            MacAlgorithm::Sha256 => verify_fields::<Hmac<Sha256>>(key, fields, signature),
            MacAlgorithm::Sha1 => verify_fields::<Hmac<Sha1>>(key, fields, signature),
        }
    }
}

fn verify_fields<M: Mac + KeyInit>(key: &[u8], fields: &[&[u8]], signature: &[u8]) -> bool {
    // HMAC accepts keys of any length
    let Ok(mut mac) = <M as KeyInit>::new_from_slice(key) else {
        return false;
    };
    for field in fields {
        mac.update(field);
    }
    // verify_slice compares with subtle::ConstantTimeEq
    mac.verify_slice(signature).is_ok()
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown MAC algorithm '{0}', expected 'sha256' or 'sha1'")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for MacAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" | "hmac-sha256" => Ok(MacAlgorithm::Sha256),
            "sha1" | "sha-1" | "hmac-sha1" => Ok(MacAlgorithm::Sha1),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
