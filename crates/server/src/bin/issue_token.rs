//! Mint a development bearer token.
//!
//! Usage: `issue-token <role> [subject] [name] [organization]`
//!
//! Signs with `JWT_SECRET` (read from the environment or `.env`), valid
//! for `JWT_TOKEN_TTL_HOURS` hours (default 8).

use server::auth::jwt::{token_ttl_hours, JwtKeys};
use shared_types::UserRole;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args().skip(1);
    let role_arg = args.next().ok_or("usage: issue-token <role> [subject] [name] [organization]")?;
    let role = UserRole::parse(&role_arg).ok_or_else(|| {
        let known: Vec<&str> = UserRole::ALL.iter().map(|r| r.as_str()).collect();
        format!("unknown role '{role_arg}', expected one of: {}", known.join(", "))
    })?;

    let subject = args.next().unwrap_or_else(|| format!("dev-{}", role.as_str()));
    let name = args.next().unwrap_or_else(|| "Development User".to_string());
    let organization = args.next();

    let keys = JwtKeys::from_env()?;
    let ttl = chrono::Duration::hours(token_ttl_hours());
    let token = keys.issue(&subject, &name, role, organization.as_deref(), ttl)?;
    println!("{token}");
    Ok(())
}
