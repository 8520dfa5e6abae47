//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductsResponse},
    state::State,
};

/// Product Index Handler
///
/// Returns the product catalogue, optionally filtered by a search term.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "List of products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = match search.into_inner() {
        Some(term) => state.app.products.search_products(&term).await,
        None => state.app.products.list_products().await,
    }
    .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use merx_app::domain::products::{MockProductsService, models::ProductUuid};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_with_no_products_returns_empty_list() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products().once().return_once(|| Ok(vec![]));

        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_seed_initial_products().never();

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert!(response.products.is_empty(), "expected no products");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let mut repo = MockProductsService::new();

        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let products = vec![make_product(uuid_a), make_product(uuid_b)];

        repo.expect_list_products()
            .once()
            .return_once(move || Ok(products));

        repo.expect_search_products().never();
        repo.expect_get_product().never();
        repo.expect_seed_initial_products().never();

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].uuid, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_the_search_term() -> TestResult {
        let mut repo = MockProductsService::new();

        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        repo.expect_search_products()
            .once()
            .withf(|term| term == "monitor")
            .return_once(move |_| Ok(vec![product]));

        repo.expect_list_products().never();
        repo.expect_get_product().never();
        repo.expect_seed_initial_products().never();

        let response: ProductsResponse =
            TestClient::get("http://example.com/products?search=monitor")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(response.products.len(), 1, "expected one match");
        assert_eq!(response.products[0].uuid, uuid.into_uuid());

        Ok(())
    }
}
