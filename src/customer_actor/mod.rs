//! # Customer Actor
//!
//! Customers on file. The simplest service: plain CRUD, no dependencies and no custom
//! actions (`Context = ()`, `Action = ()`).
//!
//! - [`entity`] - [`PersistentEntity`](resource_actor::PersistentEntity) implementation for [`Customer`]
//! - [`error`] - [`CustomerError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use resource_actor::{ResourceActor, Store};

/// Creates a new Customer actor and its client.
pub fn new(store: Store, buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(store, buffer_size);
    (actor, CustomerClient::new(generic_client))
}
