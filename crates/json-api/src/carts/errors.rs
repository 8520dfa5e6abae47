//! Errors

use salvo::http::StatusError;
use tracing::error;

use merx_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::DuplicateItem => {
            StatusError::conflict().brief("Item already exists in cart")
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::ItemNotInCart => {
            StatusError::bad_request().brief("Item does not exist in cart")
        }
        CartsServiceError::InsufficientStock => {
            StatusError::bad_request().brief("Insufficient stock")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least one")
        }
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, retry the request")
        }
        CartsServiceError::Products(source) => {
            error!("products lookup failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Store(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
