//! Serve command - runs a web server behind the proxy cookie guard.

use axum::{Router, routing::get};
use oauth2_proxy_cookie::{AuthenticatedUser, CookieGuard};
use tokio::signal::unix::{SignalKind, signal};

use crate::cli::ServeArgs;

const HEALTH_PATH: &str = "/health";

/// Run the guarded server until SIGTERM or SIGINT
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let validator = args.validator.build()?;
    tracing::info!(
        cookie_name = validator.cookie_name(),
        expiration = %validator.expiration(),
        algorithm = %validator.algorithm(),
        "Validator configured"
    );

    let mut guard = CookieGuard::new(validator)
        .allow(HEALTH_PATH)
        .trust_unproxied(!args.require_proxy)
        .require_https(args.require_https);
    for path in &args.allowed_paths {
        guard = guard.allow(path.as_str());
    }

    let app = guard.apply(
        Router::new()
            .route("/", get(handle_root_request))
            .route(HEALTH_PATH, get(handle_health_endpoint)),
    );

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("oauth2-proxy-cookie server starting on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  GET  /             - Authenticated identity");
    println!("  GET  {HEALTH_PATH}       - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Handler for GET / - echoes the identity from the cookie
async fn handle_root_request(user: Option<AuthenticatedUser>) -> axum::Json<serde_json::Value> {
    let body = match user {
        Some(user) => serde_json::json!({
            "authenticated": true,
            "identity": String::from_utf8_lossy(&user.identity),
            "issued_at": user.issued_at.to_rfc3339(),
        }),
        // Unproxied requests pass the guard without an identity
        None => serde_json::json!({ "authenticated": false }),
    };
    axum::Json(body)
}

/// Handler for GET /health
async fn handle_health_endpoint() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}
