//! Check command - validates a single cookie value.

use std::io::Read;

use crate::cli::CheckArgs;

/// Validate the cookie and print what it carries
pub fn run(args: &CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let validator = args.validator.build()?;

    let raw = match &args.cookie {
        Some(cookie) => cookie.clone(),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input.trim().to_string()
        }
    };

    match validator.validate(&raw) {
        Ok((identity, issued_at)) => {
            let body = serde_json::json!({
                "identity": String::from_utf8_lossy(&identity),
                "issued_at": issued_at.to_rfc3339(),
            });
            println!("{body}");
            Ok(())
        }
        Err(e) => {
            tracing::debug!(kind = e.kind(), "Cookie rejected");
            eprintln!("{}: {e}", e.kind());
            std::process::exit(1);
        }
    }
}
