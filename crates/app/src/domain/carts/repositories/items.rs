//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::models::{CartItem, CartItemUuid, CartUuid},
    products::models::ProductUuid,
};

use super::{encode_amount, encode_quantity, try_get_amount, try_get_quantity};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_ABSENT_CART_ITEMS_SQL: &str = include_str!("../sql/delete_absent_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert the item, or update its quantity when the product already has a
    /// row in this cart. The stored title and unit price are left untouched so
    /// the add-time snapshot survives.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &CartItem,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.title)
            .bind(encode_amount(item.unit_price)?)
            .bind(encode_quantity(item.quantity)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Delete every row of `cart` whose product is not in `kept`.
    pub(crate) async fn delete_absent_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        kept: Vec<Uuid>,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_ABSENT_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(kept)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price = try_get_amount(row, "unit_price")?;
        let quantity = try_get_quantity(row, "quantity")?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            unit_price,
            quantity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
