use anyhow::Result;
use clap::Parser;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use jobly_api::services::auth::{AuthService, Claims};

/// Mint an HS256 bearer token for local development.
///
/// The token carries `username`, `isAdmin` and `iat` (plus `exp` when a TTL is given),
/// signed with the same `SECRET_KEY` the API verifies with.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Username to put in the token.
    #[arg(long)]
    username: String,

    /// Mark the identity as admin.
    #[arg(long, default_value_t = false)]
    admin: bool,

    /// Shared secret. Defaults to the development secret.
    #[arg(long, env = "SECRET_KEY", default_value = "secret-dev", hide_env_values = true)]
    secret: String,

    /// Lifetime in seconds. Omit for a non-expiring token.
    #[arg(long)]
    ttl_seconds: Option<u64>,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,

    /// Print the decoded claims after the token.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let auth = AuthService::new(args.secret.as_bytes(), 0, args.ttl_seconds);
    let token = match args.iat {
        Some(iat) => auth.issue_at(&args.username, args.admin, iat)?,
        None => auth.issue(&args.username, args.admin)?,
    };

    println!("{token}");

    if args.verbose {
        let claims = describe(&token, args.secret.as_bytes())?;
        eprintln!("{}", serde_json::to_string_pretty(&claims)?);
    }

    Ok(())
}

// Signature is still checked; `exp` is not, so a back-dated --iat can be inspected.
fn describe(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_shows_expired_tokens() {
        let auth = AuthService::new(b"dev", 0, Some(60));
        let token = auth.issue_at("aliya", true, 1_000_000).unwrap();

        assert!(auth.verify(&token).is_err());

        let claims = describe(&token, b"dev").unwrap();
        assert_eq!(claims.username, "aliya");
        assert!(claims.is_admin);
        assert_eq!(claims.exp, Some(1_000_060));
    }

    #[test]
    fn describe_still_checks_the_signature() {
        let token = AuthService::new(b"dev", 0, None).issue("aliya", false).unwrap();
        assert!(describe(&token, b"other").is_err());
    }
}
