//! Auth Config

use clap::Args;

/// Longest accepted session lifetime: one year.
pub(crate) const MAX_JWT_TTL_MINUTES: i64 = 525_600;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in minutes
    #[arg(
        long,
        env = "JWT_TTL_MINUTES",
        default_value_t = 60_i64,
        value_parser = clap::value_parser!(i64).range(1..=MAX_JWT_TTL_MINUTES),
    )]
    pub jwt_ttl_minutes: i64,
}
