//! Cart models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

pub type CartUuid = TypedUuid<Cart>;

pub type CartItemUuid = TypedUuid<CartItem>;

/// A user's cart together with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItem>,
    /// Sum of `unit_price * quantity` over `items`. Recomputed from the items
    /// on every mutation, never adjusted incrementally.
    pub total_amount: u64,
    pub status: CartStatus,
    /// Optimistic-lock counter. The store bumps it on every save; it never
    /// leaves the persistence boundary.
    pub revision: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One product line in a cart.
///
/// `title` and `unit_price` are captured from the product when the item is
/// added and never refreshed, so later catalogue edits do not change what an
/// existing cart charges.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    Completed,
}

impl CartStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status: {0}")]
pub struct UnknownCartStatus(pub String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Total amount a cart charges for `items`.
///
/// Saturates at `u64::MAX` instead of wrapping; a saturated total is still
/// outside the signed 64-bit range the storage layer accepts, so it fails at
/// the persistence boundary rather than writing a wrapped figure.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> u64 {
    items.iter().fold(0_u64, |total, item| {
        total.saturating_add(item.unit_price.saturating_mul(u64::from(item.quantity)))
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(unit_price: u64, quantity: u32) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            product_uuid: ProductUuid::new(),
            title: "Test Product".to_string(),
            unit_price,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn cart_total_sums_line_totals() {
        assert_eq!(cart_total(&[item(9_999, 2), item(57_900, 1)]), 77_898);
    }

    #[test]
    fn cart_total_of_no_items_is_zero() {
        assert_eq!(cart_total(&[]), 0);
    }

    #[test]
    fn cart_total_saturates_instead_of_wrapping() {
        assert_eq!(cart_total(&[item(u64::MAX, 2)]), u64::MAX);
        assert_eq!(cart_total(&[item(u64::MAX, 1), item(1, 1)]), u64::MAX);
    }

    #[test]
    fn cart_status_round_trips_through_strings() -> TestResult {
        assert_eq!(
            CartStatus::from_str(CartStatus::Active.as_str())?,
            CartStatus::Active
        );

        assert_eq!(
            CartStatus::from_str(CartStatus::Completed.as_str())?,
            CartStatus::Completed
        );

        Ok(())
    }

    #[test]
    fn unknown_cart_status_is_rejected() {
        assert!(CartStatus::from_str("abandoned").is_err());
    }
}
