//! Custom actions for the Product actor.
//!
//! Stock operations that go beyond CRUD. They are handled by
//! [`PersistentEntity::handle_action`](resource_actor::PersistentEntity::handle_action); see
//! [`impl PersistentEntity for Product`](crate::model::Product#impl-PersistentEntity-for-Product).

use crate::model::{Product, ProductId};

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Finds the first bookable product of a type, in catalog (id) order.
    FirstEligible { product_type: String },
    /// Takes units out of stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if fewer than `quantity` units remain; nothing changes.
    ReserveStock { id: ProductId, quantity: u32 },
    /// Puts previously reserved units back.
    ReleaseStock { id: ProductId, quantity: u32 },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    FirstEligible(Option<Product>),
    /// Units left after the reservation.
    ReserveStock(u32),
    /// Units available after the release.
    ReleaseStock(u32),
}
