use clap::Args;
use jiff::SignedDuration;
use merx_app::{
    auth::{HmacAuthService, SigningKey},
    domain::users::models::UserUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueArgs {
    /// User UUID the token should authenticate as
    #[arg(long)]
    user_uuid: Uuid,

    /// HMAC signing key shared with the API server
    #[arg(long, env = "MERX_AUTH_SIGNING_KEY", hide_env_values = true)]
    signing_key: String,

    /// Token lifetime in seconds
    #[arg(long, default_value_t = 86_400)]
    ttl_seconds: i64,
}

pub(crate) async fn run(args: IssueArgs) -> Result<(), String> {
    if args.ttl_seconds <= 0 {
        return Err("ttl-seconds must be positive".to_string());
    }

    let key = SigningKey::new(args.signing_key.as_bytes())
        .map_err(|error| format!("invalid signing key: {error}"))?;

    let service = HmacAuthService::new(key, SignedDuration::from_secs(args.ttl_seconds));

    let issued = service
        .issue_access_token(UserUuid::from_uuid(args.user_uuid))
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", issued.user_uuid);
    println!("token_expires_at: {}", issued.expires_at);
    println!("access_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
