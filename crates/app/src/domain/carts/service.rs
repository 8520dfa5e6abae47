//! Carts Engine
//!
//! Business rules for cart mutation. The engine validates requests against
//! the product catalogue, recomputes the cart total from its items, and hands
//! the result to a [`CartsStore`]; optimistic locking in the store turns lost
//! write races into [`CartsServiceError::Conflict`].

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::{
    carts::{
        errors::{CartsServiceError, CartsStoreError},
        models::{Cart, CartItem, CartItemUuid, cart_total},
        store::CartsStore,
    },
    products::{ProductsService, ProductsServiceError, models::ProductUuid},
    users::models::UserUuid,
};

#[derive(Clone)]
pub struct CartsEngine {
    store: Arc<dyn CartsStore>,
    products: Arc<dyn ProductsService>,
}

impl CartsEngine {
    #[must_use]
    pub fn new(store: Arc<dyn CartsStore>, products: Arc<dyn ProductsService>) -> Self {
        Self { store, products }
    }

    async fn active_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        if let Some(cart) = self.store.find_active_cart(user).await? {
            return Ok(cart);
        }

        match self.store.create_active_cart(user).await {
            Ok(cart) => Ok(cart),
            Err(CartsStoreError::ActiveCartExists) => {
                // Lost the creation race; use the winner's cart.
                tracing::debug!(user_uuid = %user, "active cart appeared concurrently");

                self.store
                    .find_active_cart(user)
                    .await?
                    .ok_or(CartsServiceError::Store(CartsStoreError::NotFound))
            }
            Err(error) => Err(error.into()),
        }
    }
}

fn map_product_error(error: ProductsServiceError) -> CartsServiceError {
    match error {
        ProductsServiceError::NotFound => CartsServiceError::ProductNotFound,
        other => CartsServiceError::Products(other),
    }
}

#[async_trait]
impl CartsService for CartsEngine {
    async fn get_or_create_active_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        self.active_cart(user).await
    }

    #[tracing::instrument(
        name = "carts.engine.add_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product, quantity),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut cart = self.active_cart(user).await?;

        if cart.items.iter().any(|item| item.product_uuid == product) {
            return Err(CartsServiceError::DuplicateItem);
        }

        let record = self
            .products
            .get_product(product)
            .await
            .map_err(map_product_error)?;

        if quantity > record.stock {
            return Err(CartsServiceError::InsufficientStock);
        }

        let now = Timestamp::now();

        cart.items.push(CartItem {
            uuid: CartItemUuid::new(),
            product_uuid: record.uuid,
            title: record.title,
            unit_price: record.price,
            quantity,
            created_at: now,
            updated_at: now,
        });

        cart.total_amount = cart_total(&cart.items);

        let saved = self.store.save_cart(&cart).await?;

        info!(cart_uuid = %saved.uuid, product_uuid = %product, "added item to cart");

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.engine.update_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product, quantity),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut cart = self.active_cart(user).await?;

        // At most one line per product, enforced at add time and by the
        // UNIQUE (cart_uuid, product_uuid) constraint.
        let Some(item) = cart
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product)
        else {
            return Err(CartsServiceError::ItemNotInCart);
        };

        let record = self
            .products
            .get_product(product)
            .await
            .map_err(map_product_error)?;

        if quantity > record.stock {
            return Err(CartsServiceError::InsufficientStock);
        }

        item.quantity = quantity;
        item.updated_at = Timestamp::now();

        cart.total_amount = cart_total(&cart.items);

        let saved = self.store.save_cart(&cart).await?;

        info!(cart_uuid = %saved.uuid, product_uuid = %product, "updated cart item quantity");

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.engine.remove_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.active_cart(user).await?;

        let before = cart.items.len();

        cart.items.retain(|item| item.product_uuid != product);

        if cart.items.len() == before {
            return Err(CartsServiceError::ItemNotInCart);
        }

        cart.total_amount = cart_total(&cart.items);

        let saved = self.store.save_cart(&cart).await?;

        info!(cart_uuid = %saved.uuid, product_uuid = %product, "removed item from cart");

        Ok(saved)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Fetch the user's active cart, creating an empty one when none exists.
    async fn get_or_create_active_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the active cart.
    ///
    /// The product's current title and price are captured onto the new line.
    /// Stock is checked at add time, not reserved. Adding a product already
    /// in the cart fails with [`CartsServiceError::DuplicateItem`] rather
    /// than merging quantities.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Replace the quantity of a line already in the cart.
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;
}
