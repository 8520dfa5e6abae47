//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's active cart, creating an empty one when none exists.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The active cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_active_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use merx_app::domain::carts::{CartsServiceError, CartsStoreError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_the_active_cart() -> TestResult {
        let cart = make_cart(TEST_USER_UUID);
        let uuid = cart.uuid;

        let mut repo = MockCartsService::new();

        repo.expect_get_or_create_active_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(cart));

        repo.expect_add_item().never();
        repo.expect_update_item().never();
        repo.expect_remove_item().never();

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.user_uuid, TEST_USER_UUID.into_uuid());
        assert!(body.items.is_empty(), "expected an empty cart");
        assert_eq!(body.total_amount, 0);
        assert_eq!(body.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_body_never_exposes_the_revision() -> TestResult {
        let mut cart = make_cart(TEST_USER_UUID);
        cart.revision = 7;

        let mut repo = MockCartsService::new();

        repo.expect_get_or_create_active_cart()
            .once()
            .return_once(move |_| Ok(cart));

        repo.expect_add_item().never();
        repo.expect_update_item().never();
        repo.expect_remove_item().never();

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert!(
            !body.contains("revision"),
            "revision leaked into the response: {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_storage_failure_returns_500() -> TestResult {
        let mut repo = MockCartsService::new();

        repo.expect_get_or_create_active_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Store(CartsStoreError::NotFound)));

        repo.expect_add_item().never();
        repo.expect_update_item().never();
        repo.expect_remove_item().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
