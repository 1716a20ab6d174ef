//!
//! oauth2-proxy-cookie: validate the authentication cookie set by an
//! [oauth2_proxy](https://github.com/oauth2-proxy/oauth2-proxy) in front of
//! your service.
//!
//! ## Core Concepts
//!
//! * **Validator (`cookie::Validator`)**: Holds the secret shared with the proxy and turns a
//!   raw cookie value into the authenticated identity and its issuance time, or a typed
//!   [`ValidateError`].
//! * **Settings (`settings::ValidatorSettings`)**: Reads secret, cookie name, expiration and
//!   MAC algorithm from the environment.
//! * **Clock (`clock::Clock`)**: Time source for the validity window; frozen in tests.
//! * **Guard (`guard::CookieGuard`)**: axum middleware that requires a valid cookie on
//!   proxied requests (requires the "middleware" feature).
//!
//! ## Example
//!
//! ```
//! use oauth2_proxy_cookie::Validator;
//!
//! let validator = Validator::new("ThisIsASecret", "_oauth2_proxy").unwrap();
//! match validator.validate("AAAA|1483250400|WW3isJGM26B1RCA2fxVnI0c88nzEdPmt5Yjs8I7Y6DE=") {
//!     Ok((identity, issued_at)) => println!("{identity:?} since {issued_at}"),
//!     Err(err) => assert_eq!(err.kind(), "InvalidSignature"),
//! }
//! ```

pub mod clock;
pub mod constants;
pub mod cookie;
#[cfg(feature = "middleware")]
pub mod guard;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use cookie::{MacAlgorithm, ValidateError, Validator, ValidatorBuilder};
#[cfg(feature = "middleware")]
pub use guard::{AuthenticatedUser, CookieGuard, GuardDecision, require_proxy_cookie};
pub use settings::{SettingsError, ValidatorSettings, parse_expiration};

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured validation errors from the cookie module
    #[error(transparent)]
    Validate(cookie::ValidateError),

    /// Structured configuration errors from the settings module
    #[error(transparent)]
    Settings(settings::SettingsError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Validate(_) => "cookie",
            Error::Settings(_) => "settings",
        }
    }

    /// Check if this error comes from configuration rather than from a
    /// presented cookie.
    pub fn is_config_error(&self) -> bool {
        match self {
            Error::Validate(validate_err) => validate_err.is_config_error(),
            Error::Settings(_) => true,
        }
    }

    /// Check if this error is a cookie rejection.
    pub fn is_rejection(&self) -> bool {
        match self {
            Error::Validate(validate_err) => validate_err.is_rejection(),
            Error::Settings(_) => false,
        }
    }
}
