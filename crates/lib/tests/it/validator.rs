//! Tests for validating cookie values end to end.

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, TimeDelta};
use oauth2_proxy_cookie::{MacAlgorithm, ValidateError, Validator};

use crate::helpers::*;

#[test]
fn test_validate_known_cookies() {
    let (validator, _clock) = frozen_validator();

    assert_eq!(
        validator.validate(VALID_COOKIE).unwrap(),
        (b"foo@bar".to_vec(), cookie_date())
    );

    assert!(validator.validate("foobar").unwrap_err().is_invalid_cookie());
    assert!(
        validator
            .validate("foobar|foo|asd|asd")
            .unwrap_err()
            .is_invalid_cookie()
    );
    assert_eq!(
        validator.validate(INVALID_COOKIE),
        Err(ValidateError::InvalidSignature)
    );
    assert!(validator.validate(EXPIRED_COOKIE).unwrap_err().is_expired());
}

#[test]
fn test_validate_is_repeatable() {
    let (validator, _clock) = frozen_validator();
    let first = validator.validate(VALID_COOKIE).unwrap();
    let second = validator.validate(VALID_COOKIE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wrong_segment_counts_are_invalid_cookies() {
    let (validator, _clock) = frozen_validator();
    for raw in ["", "|", "a|b", "a|b|c|d", "||||", VALID_COOKIE.replace('|', "").as_str()] {
        let err = validator.validate(raw).unwrap_err();
        assert!(err.is_invalid_cookie(), "{raw:?} gave {err:?}");
    }
}

#[test]
fn test_every_signature_byte_is_checked() {
    let (validator, _clock) = frozen_validator();
    let (prefix, signature) = VALID_COOKIE.rsplit_once('|').unwrap();

    for (idx, original) in signature.char_indices() {
        if original == '=' {
            continue;
        }
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = signature.to_string();
        tampered.replace_range(idx..idx + 1, &replacement.to_string());
        let cookie = format!("{prefix}|{tampered}");

        assert_eq!(
            validator.validate(&cookie),
            Err(ValidateError::InvalidSignature),
            "tampering position {idx} was not detected"
        );
    }
}

#[test]
fn test_malformed_signature_is_a_signature_error() {
    let (validator, _clock) = frozen_validator();
    for signature in ["", "!!!!", "WW3isJGM26B1RCA2fxVnI0c88nzEdPmt5Yjs8I7Y6DE", "AAAA"] {
        let cookie = format!("Zm9vQGJhcg==|{COOKIE_DATE}|{signature}");
        assert_eq!(
            validator.validate(&cookie),
            Err(ValidateError::InvalidSignature),
            "signature {signature:?}"
        );
    }
}

#[test]
fn test_signature_is_bound_to_cookie_name_and_secret() {
    let clock = Arc::new(oauth2_proxy_cookie::FixedClock::from_secs(COOKIE_DATE));

    let other_name = Validator::builder(SECRET, "_other_cookie")
        .clock(clock.clone())
        .build()
        .unwrap();
    assert!(other_name.validate(VALID_COOKIE).unwrap_err().is_invalid_signature());

    let other_secret = Validator::builder("ThisIsAnotherSecret", COOKIE_NAME)
        .clock(clock)
        .build()
        .unwrap();
    assert!(other_secret.validate(VALID_COOKIE).unwrap_err().is_invalid_signature());
}

#[test]
fn test_signature_covers_encoded_value_not_decoded() {
    let (validator, _clock) = frozen_validator();
    // Same identity bytes, different encoding: the MAC no longer matches
    let (_, rest) = VALID_COOKIE.split_once('|').unwrap();
    let cookie = format!("Zm9vQGJhcg|{rest}");
    assert!(validator.validate(&cookie).unwrap_err().is_invalid_signature());
}

#[test]
fn test_generated_cookie_round_trips() {
    let (validator, _clock) = frozen_validator();
    let identity = "jane.doe@example.com".as_bytes();
    let cookie = sign_cookie(SECRET, COOKIE_NAME, identity, COOKIE_DATE - 60);

    let (decoded, issued_at) = validator.validate(&cookie).unwrap();
    assert_eq!(decoded, identity);
    assert_eq!(issued_at.timestamp(), COOKIE_DATE - 60);
}

#[test]
fn test_binary_identity_is_returned_verbatim() {
    let (validator, _clock) = frozen_validator();
    let identity = [0u8, 0xff, 0xfb, b'|', 0x10];
    let cookie = sign_cookie(SECRET, COOKIE_NAME, &identity, COOKIE_DATE);
    assert_eq!(validator.validate(&cookie).unwrap().0, identity);
}

#[test]
fn test_expiration_boundary() {
    let (validator, _clock) = frozen_validator();
    let oldest = COOKIE_DATE - 3600;

    let cookie = sign_cookie(SECRET, COOKIE_NAME, b"foo@bar", oldest);
    assert!(validator.validate(&cookie).is_ok());

    let cookie = sign_cookie(SECRET, COOKIE_NAME, b"foo@bar", oldest - 1);
    assert_eq!(
        validator.validate(&cookie),
        Err(ValidateError::ExpiredCookie {
            issued_at: DateTime::from_timestamp(oldest - 1, 0).unwrap()
        })
    );
}

#[test]
fn test_clock_skew_boundary() {
    let (validator, _clock) = frozen_validator();
    let newest = COOKIE_DATE + 5 * 60;

    let cookie = sign_cookie(SECRET, COOKIE_NAME, b"foo@bar", newest);
    assert!(validator.validate(&cookie).is_ok());

    let cookie = sign_cookie(SECRET, COOKIE_NAME, b"foo@bar", newest + 1);
    assert!(validator.validate(&cookie).unwrap_err().is_expired());
}

#[test]
fn test_clock_skew_does_not_grow_with_expiration() {
    let (validator, _clock) = frozen_validator_with(MacAlgorithm::Sha256, TimeDelta::days(30));
    let cookie = sign_cookie(SECRET, COOKIE_NAME, b"foo@bar", COOKIE_DATE + 5 * 60 + 1);
    assert!(validator.validate(&cookie).unwrap_err().is_expired());
}

#[test]
fn test_time_is_read_on_every_call() {
    let (validator, clock) = frozen_validator();
    assert!(validator.validate(VALID_COOKIE).is_ok());

    clock.advance(TimeDelta::hours(1));
    assert!(validator.validate(VALID_COOKIE).is_ok());

    clock.advance(TimeDelta::seconds(1));
    assert!(validator.validate(VALID_COOKIE).unwrap_err().is_expired());

    // The cookie dated one hour ahead becomes valid once we catch up
    assert!(validator.validate(EXPIRED_COOKIE).is_ok());
}

#[test]
fn test_signed_but_unparseable_timestamp_is_invalid_cookie() {
    let (validator, _clock) = frozen_validator();
    let value = "Zm9vQGJhcg==";
    for timestamp in ["foo", "", "1.5", "0x10", "99999999999999999999"] {
        // Signed over the bogus timestamp so the MAC check passes
        let cookie = resign(value, timestamp);
        let err = validator.validate(&cookie).unwrap_err();
        assert!(err.is_invalid_cookie(), "{timestamp:?} gave {err:?}");
    }
}

#[test]
fn test_signed_but_undecodable_identity_is_invalid_cookie() {
    let (validator, _clock) = frozen_validator();
    let cookie = resign("not base64!", &COOKIE_DATE.to_string());
    assert!(validator.validate(&cookie).unwrap_err().is_invalid_cookie());
}

#[test]
fn test_legacy_sha1_cookies() {
    let (validator, _clock) = frozen_validator_with(MacAlgorithm::Sha1, TimeDelta::hours(1));
    assert_eq!(
        validator.validate(SHA1_COOKIE).unwrap(),
        (b"foo@bar".to_vec(), cookie_date())
    );
    assert!(validator.validate(VALID_COOKIE).unwrap_err().is_invalid_signature());

    let cookie = sign_cookie_sha1(SECRET, COOKIE_NAME, b"bob", COOKIE_DATE);
    assert_eq!(validator.validate(&cookie).unwrap().0, b"bob");

    let (sha256, _clock) = frozen_validator();
    assert!(sha256.validate(SHA1_COOKIE).unwrap_err().is_invalid_signature());
}

#[test]
fn test_concurrent_validation() {
    let (validator, _clock) = frozen_validator();
    let validator = Arc::new(validator);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        assert!(validator.validate(VALID_COOKIE).is_ok());
                    } else {
                        assert!(validator.validate(INVALID_COOKIE).is_err());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Sign arbitrary raw segments, bypassing the encoding `sign_cookie` does.
fn resign(value: &str, timestamp: &str) -> String {
    use base64ct::{Base64Url, Encoding};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET).unwrap();
    mac.update(COOKIE_NAME.as_bytes());
    mac.update(value.as_bytes());
    mac.update(timestamp.as_bytes());
    let signature = Base64Url::encode_string(&mac.finalize().into_bytes());
    format!("{value}|{timestamp}|{signature}")
}
