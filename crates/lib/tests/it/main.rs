/*! Integration tests for oauth2-proxy-cookie.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - validator: Tests for cookie validation against known and generated cookies
 * - settings: Tests for building validators from environment-style settings
 * - guard: Tests for the axum middleware over a live server
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("oauth2_proxy_cookie=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod validator;
