//! Register User Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{RegisterRequest, TokenResponse},
    },
};

/// Register User Handler
///
/// Creates an account and signs the new user straight in.
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::OK, description = "Account created, token issued"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use merx_app::{
        auth::{AuthServiceError, IssuedAccessToken},
        domain::users::{MockUsersService, UsersServiceError, models::UserUuid},
    };

    use crate::test_helpers::users_service;

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(
            users,
            Router::with_path("users/register").post(handler),
        )
    }

    fn issued_token(user: UserUuid) -> IssuedAccessToken {
        IssuedAccessToken {
            token: "mx_v1_test.token".to_string(),
            user_uuid: user,
            expires_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_register_returns_200_with_token() -> TestResult {
        let mut users = MockUsersService::new();
        let user = UserUuid::new();

        users
            .expect_register()
            .once()
            .withf(|new_user| {
                new_user.email == "ada@example.com"
                    && new_user.password == "correct horse battery staple"
                    && new_user.first_name == "Ada"
                    && new_user.last_name == "Lovelace"
            })
            .return_once(move |_| Ok(issued_token(user)));

        users.expect_login().never();

        let mut res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "email": "ada@example.com",
                "password": "correct horse battery staple",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: TokenResponse = res.take_json().await?;

        assert_eq!(body.token, "mx_v1_test.token");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(UsersServiceError::EmailTaken));

        users.expect_login().never();

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "email": "ada@example.com",
                "password": "correct horse battery staple",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_with_missing_fields_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_register().never();
        users.expect_login().never();

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({ "email": "ada@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_token_failure_returns_500() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(UsersServiceError::Token(AuthServiceError::ExpiryOutOfRange)));

        users.expect_login().never();

        let res = TestClient::post("http://example.com/users/register")
            .json(&json!({
                "email": "ada@example.com",
                "password": "correct horse battery staple",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
