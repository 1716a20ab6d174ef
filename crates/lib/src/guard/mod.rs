//! axum middleware requiring a valid proxy cookie.
//!
//! Requests that came through oauth2_proxy carry `X-Forwarded-For`; those must
//! present a cookie that the wrapped [`Validator`] accepts. Requests without
//! the header reached the service directly and are trusted by default.
//! Allow-listed paths are never checked.
//!
//! ```no_run
//! use axum::{Router, routing::get};
//! use oauth2_proxy_cookie::{AuthenticatedUser, CookieGuard, Validator};
//!
//! async fn whoami(user: Option<AuthenticatedUser>) -> String {
//!     user.and_then(|u| u.identity_str().map(str::to_owned))
//!         .unwrap_or_default()
//! }
//!
//! let validator = Validator::new("ThisIsASecret", "_oauth2_proxy").unwrap();
//! let app: Router = CookieGuard::new(validator)
//!     .allow("/ping")
//!     .apply(Router::new().route("/", get(whoami)));
//! ```

mod extract;

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower_cookies::{CookieManagerLayer, Cookies};

pub use extract::AuthenticatedUser;

use crate::constants::{FORWARDED_FOR_HEADER, FORWARDED_PROTO_HEADER};
use crate::cookie::{ValidateError, Validator};

/// Outcome of checking one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The request is exempt: allow-listed path or unproxied traffic.
    Bypass,
    /// The cookie is valid.
    Authenticated(AuthenticatedUser),
    /// A proxied request arrived over plain HTTP while HTTPS is required.
    InsecureTransport,
    /// No cookie with the configured name was sent.
    MissingCookie,
    /// The cookie was rejected by the validator.
    Invalid(ValidateError),
}

impl GuardDecision {
    /// Status to answer with, or `None` if the request may proceed.
    pub fn rejection_status(&self) -> Option<StatusCode> {
        match self {
            GuardDecision::Bypass | GuardDecision::Authenticated(_) => None,
            GuardDecision::InsecureTransport => Some(StatusCode::FORBIDDEN),
            GuardDecision::MissingCookie | GuardDecision::Invalid(_) => {
                Some(StatusCode::UNAUTHORIZED)
            }
        }
    }
}

/// Request guard wrapping a [`Validator`].
#[derive(Debug)]
pub struct CookieGuard {
    validator: Validator,
    allowed_paths: HashSet<String>,
    trust_unproxied: bool,
    require_https: bool,
}

impl CookieGuard {
    /// Guard every proxied request, trusting requests without
    /// `X-Forwarded-For`.
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            allowed_paths: HashSet::new(),
            trust_unproxied: true,
            require_https: false,
        }
    }

    /// Exempt an exact request path from validation.
    pub fn allow(mut self, path: impl Into<String>) -> Self {
        self.allowed_paths.insert(path.into());
        self
    }

    /// Whether requests without `X-Forwarded-For` skip validation.
    pub fn trust_unproxied(mut self, trust: bool) -> Self {
        self.trust_unproxied = trust;
        self
    }

    /// Whether proxied requests must carry `X-Forwarded-Proto: https`.
    pub fn require_https(mut self, require: bool) -> Self {
        self.require_https = require;
        self
    }

    /// The wrapped validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Decide what to do with a request.
    ///
    /// `cookie` is the value of the cookie named
    /// [`Validator::cookie_name`], if the client sent one.
    pub fn check(&self, headers: &HeaderMap, path: &str, cookie: Option<&str>) -> GuardDecision {
        if self.allowed_paths.contains(path) {
            return GuardDecision::Bypass;
        }
        if self.trust_unproxied && !headers.contains_key(FORWARDED_FOR_HEADER) {
            return GuardDecision::Bypass;
        }
        if self.require_https && !forwarded_https(headers) {
            return GuardDecision::InsecureTransport;
        }

        let Some(raw) = cookie else {
            return GuardDecision::MissingCookie;
        };
        match self.validator.validate(raw) {
            Ok((identity, issued_at)) => {
                GuardDecision::Authenticated(AuthenticatedUser {
                    identity,
                    issued_at,
                })
            }
            Err(err) => GuardDecision::Invalid(err),
        }
    }

    /// Wrap every route of `router` with this guard.
    ///
    /// Installs the `tower-cookies` layer the middleware reads cookies from.
    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .layer(middleware::from_fn_with_state(
                Arc::new(self),
                require_proxy_cookie,
            ))
            .layer(CookieManagerLayer::new())
    }
}

fn forwarded_https(headers: &HeaderMap) -> bool {
    headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

/// Middleware enforcing a [`CookieGuard`].
///
/// Use with [`axum::middleware::from_fn_with_state`] below a
/// [`CookieManagerLayer`], or through [`CookieGuard::apply`]. Rejections are
/// logged with the cookie value and failure kind.
pub async fn require_proxy_cookie(
    State(guard): State<Arc<CookieGuard>>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie = cookies.get(guard.validator.cookie_name());
    let raw = cookie.as_ref().map(|c| c.value());
    let path = request.uri().path().to_owned();

    match guard.check(request.headers(), &path, raw) {
        GuardDecision::Bypass => {}
        GuardDecision::Authenticated(user) => {
            tracing::debug!(
                path = %path,
                identity = %String::from_utf8_lossy(&user.identity),
                issued_at = %user.issued_at,
                "Authenticated proxy cookie"
            );
            request.extensions_mut().insert(user);
        }
        decision @ GuardDecision::InsecureTransport => {
            tracing::warn!(path = %path, "Rejected proxied request without HTTPS");
            return reject(&decision);
        }
        decision @ GuardDecision::MissingCookie => {
            tracing::info!(
                path = %path,
                cookie_name = guard.validator.cookie_name(),
                "Rejected request without proxy cookie"
            );
            return reject(&decision);
        }
        GuardDecision::Invalid(err) => {
            tracing::warn!(
                path = %path,
                cookie = raw.unwrap_or_default(),
                kind = err.kind(),
                "Rejected proxy cookie: {err}"
            );
            return reject(&GuardDecision::Invalid(err));
        }
    }

    next.run(request).await
}

fn reject(decision: &GuardDecision) -> Response {
    decision
        .rejection_status()
        .unwrap_or(StatusCode::UNAUTHORIZED)
        .into_response()
}
