//! Plain data structures (DTOs) implementing the [`PersistentEntity`](resource_actor::PersistentEntity) trait.

pub mod customer;
pub mod product;
pub mod rental;

pub use customer::*;
pub use product::*;
pub use rental::*;
