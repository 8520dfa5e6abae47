//! Cart Response Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merx_app::domain::carts::models::{Cart, CartItem};

/// Cart Response
///
/// The storage revision is internal bookkeeping and never leaves the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The owner of the cart
    pub user_uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// The sum of the line totals, in pence/cents
    pub total_amount: u64,

    /// The cart status (`active` or `completed`)
    pub status: String,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: cart.uuid.into_uuid(),
            user_uuid: cart.user_uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_amount: cart.total_amount,
            status: cart.status.to_string(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product this line refers to
    pub product_uuid: Uuid,

    /// The product title captured when the item was added
    pub title: String,

    /// The unit price captured when the item was added, in pence/cents
    pub unit_price: u64,

    /// The number of units
    pub quantity: u32,

    /// The date and time the item was added
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            title: item.title,
            unit_price: item.unit_price,
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}
