//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{HmacAuthService, IssuedAccessToken, password},
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{Credentials, NewUser, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    tokens: HmacAuthService,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, tokens: HmacAuthService) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            tokens,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, new_user: NewUser) -> Result<IssuedAccessToken, UsersServiceError> {
        let email = normalize_email(&new_user.email);

        let password_hash =
            password::hash_password(&new_user.password).map_err(UsersServiceError::Password)?;

        let mut tx = self.db.begin().await?;

        // The UNIQUE constraint on email decides duplicates; no read-then-write
        // window where two concurrent registrations could both pass.
        let user = self
            .repository
            .create_user(
                &mut tx,
                UserUuid::new(),
                &email,
                &password_hash,
                &new_user.first_name,
                &new_user.last_name,
            )
            .await?;

        tx.commit().await?;

        self.tokens
            .issue_access_token(user.uuid)
            .map_err(UsersServiceError::Token)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedAccessToken, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_email(&mut tx, &normalize_email(&credentials.email))
            .await?;

        tx.commit().await?;

        let Some(user) = user else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        let password_matches =
            password::verify_password(&credentials.password, &user.password_hash)
                .map_err(UsersServiceError::Password)?;

        if !password_matches {
            return Err(UsersServiceError::InvalidCredentials);
        }

        self.tokens
            .issue_access_token(user.uuid)
            .map_err(UsersServiceError::Token)
    }
}

/// Addresses are stored and looked up in one canonical form so that
/// `Ada@Example.com` and `ada@example.com` are the same account.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account and sign the new user straight in.
    async fn register(&self, new_user: NewUser) -> Result<IssuedAccessToken, UsersServiceError>;

    /// Exchange credentials for an access token.
    ///
    /// Unknown email and wrong password both fail with
    /// [`UsersServiceError::InvalidCredentials`].
    async fn login(&self, credentials: Credentials) -> Result<IssuedAccessToken, UsersServiceError>;
}
