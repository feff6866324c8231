//! # Product Actor
//!
//! The catalog service: products, their codes and daily rates, and the stock counts that
//! decide whether a product can be booked.
//!
//! ## Structure
//!
//! - [`entity`] - [`PersistentEntity`](resource_actor::PersistentEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // The unit a booking for "Van" would use
//! let van = product_client.first_eligible("Van").await?;
//!
//! // Take one unit out of stock; fails with InsufficientStock when none are left
//! product_client.reserve_stock(van.id, 1).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let store = Store::open("rental_inventory.db");
//! rental_desk::store::migrate(&store).await?;
//!
//! let (actor, client) = product_actor::new(store, 32);
//! tokio::spawn(actor.run(()));
//!
//! let id = client
//!     .add_product(ProductCreate {
//!         product_type: "Car".into(),
//!         product_code: "CAR900".into(),
//!         cost_per_day: Decimal::new(1450, 2),
//!         quantity: 2,
//!     })
//!     .await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::{ResourceActor, Store};

/// Creates a new Product actor and its client.
pub fn new(store: Store, buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(store, buffer_size);
    (actor, ProductClient::new(generic_client))
}
