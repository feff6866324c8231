//! # Rental Actor
//!
//! The booking service and the rental history. Rentals depend on the catalog, so this actor
//! runs with a [`RentalContext`] holding a [`ProductClient`].
//!
//! ## Structure
//!
//! - [`entity`] - [`PersistentEntity`](resource_actor::PersistentEntity) implementation for [`Rental`]
//! - [`error`] - [`RentalError`]
//! - [`receipt`] - receipt reference generators
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (product_actor, products) = product_actor::new(store.clone(), 32);
//! let (rental_actor, rentals) = rental_actor::new(store, 32);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(rental_actor.run(RentalContext::new(products.clone())));
//!
//! let id = rentals
//!     .book(BookingRequest {
//!         customer_id,
//!         product_type: "Car".into(),
//!         period: "1-30 days".into(),
//!         terms: AccountTerms::default(),
//!     })
//!     .await?;
//! ```

pub mod entity;
pub mod error;
pub mod receipt;

pub use error::*;
pub use receipt::{random_receipts, scripted_receipts, ReceiptGenerator};

use crate::clients::{ProductClient, RentalClient};
use crate::model::Rental;
use resource_actor::{ResourceActor, Store};

/// Attempts at drawing an unused receipt reference before a booking gives up.
pub const DEFAULT_RECEIPT_ATTEMPTS: u32 = 8;

/// Runtime dependencies of the rental actor.
#[derive(Clone)]
pub struct RentalContext {
    pub products: ProductClient,
    pub receipts: ReceiptGenerator,
    /// Take one unit of stock per booking. Off by default: the ledger alone records demand.
    pub reserve_stock: bool,
    pub receipt_attempts: u32,
}

impl RentalContext {
    pub fn new(products: ProductClient) -> Self {
        Self {
            products,
            receipts: random_receipts(),
            reserve_stock: false,
            receipt_attempts: DEFAULT_RECEIPT_ATTEMPTS,
        }
    }

    pub fn with_receipts(mut self, receipts: ReceiptGenerator) -> Self {
        self.receipts = receipts;
        self
    }

    pub fn with_reserve_stock(mut self, reserve_stock: bool) -> Self {
        self.reserve_stock = reserve_stock;
        self
    }

    /// At least one attempt is always made.
    pub fn with_receipt_attempts(mut self, attempts: u32) -> Self {
        self.receipt_attempts = attempts.max(1);
        self
    }
}

/// Creates a new Rental actor and its client.
pub fn new(store: Store, buffer_size: usize) -> (ResourceActor<Rental>, RentalClient) {
    let (actor, generic_client) = ResourceActor::new(store, buffer_size);
    (actor, RentalClient::new(generic_client))
}
