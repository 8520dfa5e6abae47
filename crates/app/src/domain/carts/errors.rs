//! Carts errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::ProductsServiceError;

/// Failures raised by the carts store.
#[derive(Debug, Error)]
pub enum CartsStoreError {
    /// The user already has an active cart. Raised by the partial unique
    /// index when two requests race to create one.
    #[error("user already has an active cart")]
    ActiveCartExists,

    #[error("cart not found")]
    NotFound,

    /// The cart was modified since it was read; nothing was written.
    #[error("cart was modified concurrently")]
    RevisionConflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::ActiveCartExists,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Failures raised by the carts engine.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The product is already in the cart; quantity changes go through
    /// the update operation instead.
    #[error("item already exists in cart")]
    DuplicateItem,

    #[error("product not found")]
    ProductNotFound,

    #[error("item does not exist in cart")]
    ItemNotInCart,

    /// The requested quantity exceeds the product's available stock.
    #[error("insufficient stock")]
    InsufficientStock,

    #[error("quantity must be at least one")]
    InvalidQuantity,

    /// The cart changed under a concurrent request; the caller should retry.
    #[error("cart was modified concurrently")]
    Conflict,

    #[error("products lookup failed")]
    Products(#[source] ProductsServiceError),

    #[error("cart storage failed")]
    Store(#[source] CartsStoreError),
}

impl From<CartsStoreError> for CartsServiceError {
    fn from(error: CartsStoreError) -> Self {
        match error {
            CartsStoreError::RevisionConflict => Self::Conflict,
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = CartsStoreError::from(Error::RowNotFound);

        assert!(
            matches!(error, CartsStoreError::NotFound),
            "RowNotFound must classify as NotFound"
        );
    }

    #[test]
    fn pool_errors_map_to_sql() {
        let error = CartsStoreError::from(Error::PoolClosed);

        assert!(
            matches!(error, CartsStoreError::Sql(_)),
            "infrastructure errors must stay in the Sql bucket"
        );
    }

    #[test]
    fn revision_conflicts_surface_as_conflicts() {
        let error = CartsServiceError::from(CartsStoreError::RevisionConflict);

        assert!(matches!(error, CartsServiceError::Conflict));
    }

    #[test]
    fn other_store_errors_stay_wrapped() {
        let error = CartsServiceError::from(CartsStoreError::NotFound);

        assert!(matches!(
            error,
            CartsServiceError::Store(CartsStoreError::NotFound)
        ));
    }
}
