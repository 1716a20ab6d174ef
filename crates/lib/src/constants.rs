//! Constants used throughout the library.
//!
//! Wire-format details of the oauth2_proxy cookie and the configuration keys
//! understood by [`ValidatorSettings`](crate::ValidatorSettings).

/// Cookie name oauth2_proxy uses unless configured otherwise.
pub const DEFAULT_COOKIE_NAME: &str = "_oauth2_proxy";

/// Default validity window of an issued cookie, in seconds (7 days).
pub const DEFAULT_EXPIRATION_SECS: i64 = 7 * 24 * 60 * 60;

/// How far ahead of our clock an issuer's timestamp may be, in seconds.
pub const CLOCK_SKEW_SECS: i64 = 5 * 60;

/// Separator between the three cookie segments.
pub const SEGMENT_SEPARATOR: char = '|';

/// Environment key holding the shared cookie secret.
pub const ENV_SECRET: &str = "OAUTH2_PROXY_COOKIE_SECRET";

/// Environment key holding the cookie name.
pub const ENV_COOKIE_NAME: &str = "OAUTH2_PROXY_COOKIE_NAME";

/// Environment key holding the cookie expiration.
pub const ENV_EXPIRATION: &str = "OAUTH2_PROXY_COOKIE_EXPIRATION";

/// Environment key holding the MAC algorithm name.
pub const ENV_ALGORITHM: &str = "OAUTH2_PROXY_COOKIE_ALGORITHM";

/// Header set by the proxy on every request it forwards.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Header carrying the scheme the client used to reach the proxy.
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
