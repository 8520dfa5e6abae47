//! Auth Config

use clap::Args;

/// Access token settings.
///
/// The signing key has no default; the server refuses to start without one.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC key material for signing access tokens (at least 32 bytes)
    #[arg(long, env = "MERX_AUTH_SIGNING_KEY", hide_env_values = true)]
    pub signing_key: String,

    /// Access token lifetime in seconds
    #[arg(long, env = "MERX_AUTH_TOKEN_TTL_SECONDS", default_value_t = 86_400)]
    pub token_ttl_seconds: i64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        auth: AuthConfig,
    }

    #[test]
    fn token_ttl_defaults_to_one_day() {
        let harness = Harness::parse_from(["merx-json", "--signing-key", "k"]);

        assert_eq!(harness.auth.token_ttl_seconds, 86_400);
    }
}
