//! Cart persistence.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsStoreError,
            models::{Cart, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsStore {
    db: Db,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
}

impl PgCartsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsStore for PgCartsStore {
    async fn find_active_cart(&self, user: UserUuid) -> Result<Option<Cart>, CartsStoreError> {
        let mut tx = self.db.begin().await?;

        let Some(mut cart) = self.carts.find_active_cart(&mut tx, user).await? else {
            tx.commit().await?;

            return Ok(None);
        };

        cart.items = self.items.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(Some(cart))
    }

    async fn create_active_cart(&self, user: UserUuid) -> Result<Cart, CartsStoreError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .create_cart(&mut tx, CartUuid::new(), user)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn save_cart(&self, cart: &Cart) -> Result<Cart, CartsStoreError> {
        let mut tx = self.db.begin().await?;

        // The conditional update runs first: it rejects a stale revision
        // before any item rows change, and it takes the row lock that
        // serialises concurrent saves of the same cart. Returning early
        // drops the transaction, rolling back.
        let updated = self.carts.update_cart(&mut tx, cart).await?;

        if updated == 0 {
            return Err(CartsStoreError::RevisionConflict);
        }

        let kept: Vec<Uuid> = cart
            .items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        self.items
            .delete_absent_items(&mut tx, cart.uuid, kept)
            .await?;

        for item in &cart.items {
            self.items.upsert_item(&mut tx, cart.uuid, item).await?;
        }

        let mut saved = self.carts.get_cart(&mut tx, cart.uuid).await?;

        saved.items = self.items.get_cart_items(&mut tx, saved.uuid).await?;

        tx.commit().await?;

        Ok(saved)
    }
}

#[automock]
#[async_trait]
pub trait CartsStore: Send + Sync {
    /// Fetch the user's active cart, items included.
    async fn find_active_cart(&self, user: UserUuid) -> Result<Option<Cart>, CartsStoreError>;

    /// Create an empty active cart for the user.
    ///
    /// Fails with [`CartsStoreError::ActiveCartExists`] when one already
    /// exists; the partial unique index on `carts` enforces this even when
    /// two requests race.
    async fn create_active_cart(&self, user: UserUuid) -> Result<Cart, CartsStoreError>;

    /// Persist the cart's items and totals under optimistic locking.
    ///
    /// The write only applies while the stored revision still equals
    /// `cart.revision`; otherwise nothing changes and
    /// [`CartsStoreError::RevisionConflict`] is returned. On success the
    /// authoritative cart is read back, revision already bumped.
    async fn save_cart(&self, cart: &Cart) -> Result<Cart, CartsStoreError>;
}
