use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so `check` output stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("oauth2_proxy_cookie=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Serve(args) => commands::serve::run(args).await,
    }
}
