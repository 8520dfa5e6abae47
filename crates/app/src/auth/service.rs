//! Access token issuance and verification.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::IssuedAccessToken,
        token::{AccessTokenError, AccessTokenVersion, SigningKey, format_access_token,
            verify_access_token},
    },
    domain::users::models::UserUuid,
};

/// Signs and verifies access tokens with an in-process HMAC key.
#[derive(Debug, Clone)]
pub struct HmacAuthService {
    key: SigningKey,
    token_ttl: SignedDuration,
}

impl HmacAuthService {
    #[must_use]
    pub fn new(key: SigningKey, token_ttl: SignedDuration) -> Self {
        Self { key, token_ttl }
    }

    /// Sign a new token for the user, expiring one TTL from now.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry cannot be represented or signing
    /// fails.
    pub fn issue_access_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedAccessToken, AuthServiceError> {
        let expires_at = Timestamp::now()
            .checked_add(self.token_ttl)
            .map_err(|_ignored| AuthServiceError::ExpiryOutOfRange)?;

        let token = format_access_token(
            &self.key,
            &user.into_uuid(),
            AccessTokenVersion::V1,
            expires_at.as_second(),
        )
        .map_err(AuthServiceError::Token)?;

        Ok(IssuedAccessToken {
            token,
            user_uuid: user,
            expires_at,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it authenticates.
    async fn authenticate_bearer(&self, token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[async_trait]
impl AuthService for HmacAuthService {
    async fn authenticate_bearer(&self, token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = verify_access_token(&self.key, token, Timestamp::now().as_second())
            .map_err(|error| match error {
                AccessTokenError::InvalidSigningKey => AuthServiceError::Token(error),
                AccessTokenError::InvalidFormat
                | AccessTokenError::UnsupportedVersion
                | AccessTokenError::InvalidSignatureEncoding
                | AccessTokenError::SignatureMismatch
                | AccessTokenError::Expired => AuthServiceError::Invalid,
            })?;

        Ok(UserUuid::from_uuid(parsed.user_uuid))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::token::SIGNING_KEY_MIN_BYTES;

    use super::*;

    fn make_service() -> HmacAuthService {
        let key = SigningKey::new(&[0x42; SIGNING_KEY_MIN_BYTES]).expect("key should build");

        HmacAuthService::new(key, SignedDuration::from_secs(3_600))
    }

    #[tokio::test]
    async fn issued_tokens_authenticate() -> TestResult {
        let service = make_service();
        let user = UserUuid::new();

        let issued = service.issue_access_token(user)?;

        assert!(
            issued.expires_at > Timestamp::now(),
            "a fresh token must not already be expired"
        );

        let authenticated = service.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, user);

        Ok(())
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() -> TestResult {
        let service = make_service();
        let key = SigningKey::new(&[0x42; SIGNING_KEY_MIN_BYTES]).expect("key should build");
        let user = UserUuid::new();

        // Signed with the right key, but already expired.
        let token = format_access_token(
            &key,
            &user.into_uuid(),
            AccessTokenVersion::V1,
            Timestamp::now().as_second() - 60,
        )?;

        let result = service.authenticate_bearer(&token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Invalid)),
            "expired tokens must be rejected uniformly"
        );

        Ok(())
    }

    #[tokio::test]
    async fn garbage_tokens_are_rejected() -> TestResult {
        let service = make_service();

        let result = service.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::Invalid)));

        Ok(())
    }

    #[tokio::test]
    async fn tokens_from_another_key_are_rejected() -> TestResult {
        let service = make_service();
        let other_key =
            SigningKey::new(&[0x43; SIGNING_KEY_MIN_BYTES]).expect("key should build");
        let user = UserUuid::new();

        let token = format_access_token(
            &other_key,
            &user.into_uuid(),
            AccessTokenVersion::V1,
            Timestamp::now().as_second() + 3_600,
        )?;

        let result = service.authenticate_bearer(&token).await;

        assert!(matches!(result, Err(AuthServiceError::Invalid)));

        Ok(())
    }
}
