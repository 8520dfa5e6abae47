//! Auth Models

use jiff::Timestamp;

use crate::domain::users::models::UserUuid;

/// A freshly signed access token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub user_uuid: UserUuid,
    pub expires_at: Timestamp,
}
