//! Carts
//!
//! Each user has at most one active cart. The [`service::CartsEngine`] owns
//! the shopping rules (duplicate items, stock limits, price snapshots) and
//! drives a [`store::CartsStore`] for persistence.

pub mod errors;
pub mod models;
mod repositories;
pub mod service;
pub mod store;

pub use errors::*;
pub use service::*;
pub use store::*;
