//! Request extension carrying the authenticated identity.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::StatusCode;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};

/// Identity recovered from a valid proxy cookie.
///
/// Inserted into the request extensions by
/// [`require_proxy_cookie`](super::require_proxy_cookie). Handlers can take it
/// as an extractor; use `Option<AuthenticatedUser>` on routes that also serve
/// allow-listed or unproxied requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Raw identity payload, usually an email address.
    pub identity: Vec<u8>,
    /// When the proxy issued the cookie.
    pub issued_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    /// The identity as UTF-8, if it is valid UTF-8.
    pub fn identity_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.identity).ok()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthenticatedUser>().cloned())
    }
}
