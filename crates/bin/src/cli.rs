//! CLI argument definitions for the oauth2-proxy-cookie binary.

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use oauth2_proxy_cookie::{MacAlgorithm, Validator, parse_expiration};

/// Validate oauth2_proxy authentication cookies
#[derive(Parser, Debug)]
#[command(name = "oauth2-proxy-cookie")]
#[command(about = "Validate oauth2_proxy authentication cookies")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single cookie value
    Check(CheckArgs),
    /// Run an HTTP server guarded by the proxy cookie
    Serve(ServeArgs),
}

/// Settings shared by every command that validates cookies
#[derive(clap::Args, Debug)]
pub struct ValidatorArgs {
    /// Secret shared with oauth2_proxy (its cookie-secret)
    #[arg(long, env = "OAUTH2_PROXY_COOKIE_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Name of the cookie set by oauth2_proxy
    #[arg(long, default_value = "_oauth2_proxy", env = "OAUTH2_PROXY_COOKIE_NAME")]
    pub cookie_name: String,

    /// How long a cookie stays valid, in seconds or with an s/m/h/d suffix
    #[arg(
        long,
        default_value = "7d",
        value_parser = parse_expiration,
        env = "OAUTH2_PROXY_COOKIE_EXPIRATION"
    )]
    pub expiration: TimeDelta,

    /// Hash used for the cookie signature (sha256 or sha1)
    #[arg(long, default_value = "sha256", env = "OAUTH2_PROXY_COOKIE_ALGORITHM")]
    pub algorithm: MacAlgorithm,
}

impl ValidatorArgs {
    /// Build the validator these arguments describe.
    pub fn build(&self) -> Result<Validator, oauth2_proxy_cookie::ValidateError> {
        Validator::builder(self.secret.as_bytes(), self.cookie_name.as_str())
            .expiration(self.expiration)
            .algorithm(self.algorithm)
            .build()
    }
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Cookie value to validate; read from stdin when omitted
    pub cookie: Option<String>,

    #[command(flatten)]
    pub validator: ValidatorArgs,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "OAUTH2_PROXY_COOKIE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "OAUTH2_PROXY_COOKIE_HOST")]
    pub host: String,

    /// Extra request paths served without a cookie (repeatable)
    #[arg(long = "allow", value_name = "PATH")]
    pub allowed_paths: Vec<String>,

    /// Require a cookie even on requests that did not come through the proxy
    #[arg(long)]
    pub require_proxy: bool,

    /// Reject proxied requests not forwarded over HTTPS
    #[arg(long)]
    pub require_https: bool,

    #[command(flatten)]
    pub validator: ValidatorArgs,
}
