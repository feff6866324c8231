//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each wrapper implements [`EntityClient`](resource_actor::EntityClient), so `get`, `list`
//! and `delete` come for free, and adds the service's own requests on top.

pub mod customer_client;
pub mod product_client;
pub mod rental_client;

pub use customer_client::*;
pub use product_client::*;
pub use rental_client::*;
